//! The account record for the portfolio owner and any registered visitors.
//!
//! Exactly one admin account exists in practice (bootstrapped at startup);
//! the model does not enforce a singleton so seed data and tests can create
//! ordinary accounts for interaction features.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Internal account record. Deliberately not `Serialize` — the password hash
/// must never cross the HTTP boundary. Use [`UserProfile`] for outward views.
#[derive(Debug, Clone)]
pub struct User {
  pub id:                Uuid,
  pub email:             String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash:     String,
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
  pub is_admin:          bool,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

/// Input to [`crate::store::PortfolioStore::add_user`].
/// `id` and timestamps are always set by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub email:         String,
  pub password_hash: String,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub is_admin:      bool,
}

/// Profile fields an admin may rewrite in place. All values are full
/// replacements: `None` clears the column.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
}

/// The outward JSON view of a [`User`] — everything except the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id:                Uuid,
  pub email:             String,
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
  pub is_admin:          bool,
  pub created_at:        DateTime<Utc>,
  pub updated_at:        DateTime<Utc>,
}

impl From<&User> for UserProfile {
  fn from(u: &User) -> Self {
    Self {
      id:                u.id,
      email:             u.email.clone(),
      first_name:        u.first_name.clone(),
      last_name:         u.last_name.clone(),
      profile_image_url: u.profile_image_url.clone(),
      hero_image_url:    u.hero_image_url.clone(),
      linkedin_url:      u.linkedin_url.clone(),
      github_url:        u.github_url.clone(),
      is_admin:          u.is_admin,
      created_at:        u.created_at,
      updated_at:        u.updated_at,
    }
  }
}
