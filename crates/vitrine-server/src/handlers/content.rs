//! Handlers for `/api/content` — the inline-editable site copy.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/api/content` | Nested `section → field → content` map |
//! | `POST` | `/api/content` | Admin; upserts one `(section, field)` fragment |

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Deserialize;
use vitrine_core::store::PortfolioStore;

use crate::{AppState, auth::AdminUser, error::Error, handlers::Message};

/// `GET /api/content`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<String, BTreeMap<String, String>>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = state
    .store
    .list_content()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
  for entry in entries {
    sections
      .entry(entry.section)
      .or_default()
      .insert(entry.field, entry.content);
  }
  Ok(Json(sections))
}

/// All fields optional at the serde layer; absences report as 400s with the
/// messages the frontend matches on.
#[derive(Debug, Deserialize)]
pub struct ContentBody {
  pub section: Option<String>,
  pub field:   Option<String>,
  pub content: Option<String>,
}

/// `POST /api/content` — upsert. An empty `content` string is a deliberate
/// value (clearing a fragment), only a missing field is an error.
pub async fn update<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Json(body): Json<ContentBody>,
) -> Result<Json<Message>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (section, field) = match (&body.section, &body.field) {
    (Some(s), Some(f)) if !s.trim().is_empty() && !f.trim().is_empty() => {
      (s.trim().to_string(), f.trim().to_string())
    }
    _ => {
      return Err(Error::Validation("Section and field are required".to_string()));
    }
  };
  let Some(content) = body.content else {
    return Err(Error::Validation("Content is required".to_string()));
  };

  state
    .store
    .set_content(section, field, content)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  Ok(Message::new("Content updated successfully"))
}
