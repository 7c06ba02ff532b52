//! Metadata for files saved by the upload endpoint.
//!
//! Binary data lives on disk under a server-generated name; only this record
//! goes through the store. Outward JSON keys mirror the upload response the
//! frontend consumes (`originalName`, `mimetype`, `size`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
  pub id:            Uuid,
  /// Server-generated name on disk (random hex + original extension).
  pub filename:      String,
  pub original_name: String,
  #[serde(rename = "mimetype")]
  pub mime_type:     String,
  #[serde(rename = "size")]
  pub size_bytes:    u64,
  /// Public path the file is served under, e.g. `/uploads/<filename>`.
  pub url:           String,
  pub uploaded_by:   Uuid,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::add_file`].
#[derive(Debug, Clone)]
pub struct NewStoredFile {
  pub filename:      String,
  pub original_name: String,
  pub mime_type:     String,
  pub size_bytes:    u64,
  pub url:           String,
  pub uploaded_by:   Uuid,
}
