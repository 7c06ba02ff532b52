//! Server-side session records backing the login cookie.
//!
//! The token is an opaque random string generated by the HTTP layer; the
//! store only persists and looks it up. Expired rows are treated as absent.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One live login. Deleted on logout; ignored (and lazily purged) after
/// `expires_at`.
#[derive(Debug, Clone)]
pub struct Session {
  pub token:      String,
  pub user_id:    Uuid,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool { self.expires_at <= now }
}
