//! Inline-editable site copy, addressed by `(section, field)`.
//!
//! The frontend edits individual text fragments in place; each lands here as
//! one row, upserted on write and read back as a nested
//! `section → field → content` map.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One editable text fragment. `(section, field)` is unique; writes to an
/// existing pair replace the content in place.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentEntry {
  pub id:         Uuid,
  pub section:    String,
  pub field:      String,
  pub content:    String,
  pub updated_at: DateTime<Utc>,
}
