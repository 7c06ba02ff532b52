//! The three portfolio content types: projects, experiences, achievements.
//!
//! Projects and achievements are slugged — they carry a URL-safe identifier
//! derived from the title, unique within their own table (see
//! [`crate::slug`]). All outward JSON uses camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Project ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  pub id:           Uuid,
  pub title:        String,
  /// Derived from `title` at creation; recomputed only when the title
  /// changes on update. No two projects share a slug.
  pub slug:         String,
  pub description:  String,
  pub image_url:    Option<String>,
  pub github_url:   Option<String>,
  pub live_url:     Option<String>,
  pub technologies: Vec<String>,
  pub featured:     bool,
  pub published:    bool,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Input to project create/update. `id`, `slug`, and timestamps are assigned
/// by the caller chain (slug) or the store (id, timestamps).
#[derive(Debug, Clone)]
pub struct NewProject {
  pub title:        String,
  pub description:  String,
  pub image_url:    Option<String>,
  pub github_url:   Option<String>,
  pub live_url:     Option<String>,
  pub technologies: Vec<String>,
  pub featured:     bool,
  pub published:    bool,
}

/// Filter for [`crate::store::PortfolioStore::list_projects`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
  pub published_only: bool,
  pub featured_only:  bool,
}

// ─── Experience ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
  pub id:               Uuid,
  pub position:         String,
  pub company:          String,
  pub start_date:       Option<DateTime<Utc>>,
  pub end_date:         Option<DateTime<Utc>>,
  pub description:      String,
  pub technologies:     Vec<String>,
  pub company_logo_url: Option<String>,
  pub published:        bool,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExperience {
  pub position:         String,
  pub company:          String,
  pub start_date:       Option<DateTime<Utc>>,
  pub end_date:         Option<DateTime<Utc>>,
  pub description:      String,
  pub technologies:     Vec<String>,
  pub company_logo_url: Option<String>,
  pub published:        bool,
}

// ─── Achievement ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
  pub id:              Uuid,
  pub title:           String,
  /// Slug uniqueness is scoped per entity type: an achievement slug may
  /// collide with a project slug.
  pub slug:            String,
  pub description:     String,
  pub date:            Option<DateTime<Utc>>,
  /// Free-text category, e.g. "certification" or "award".
  #[serde(rename = "type")]
  pub kind:            Option<String>,
  pub certificate_url: Option<String>,
  pub badge_image_url: Option<String>,
  pub published:       bool,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAchievement {
  pub title:           String,
  pub description:     String,
  pub date:            Option<DateTime<Utc>>,
  pub kind:            Option<String>,
  pub certificate_url: Option<String>,
  pub badge_image_url: Option<String>,
  pub published:       bool,
}
