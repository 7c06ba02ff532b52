//! Handlers for `/api/experiences` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/api/experiences` | Published only |
//! | `GET` | `/api/admin/experiences` | Admin; drafts included |
//! | `POST` | `/api/experiences` | Admin |
//! | `PUT` | `/api/experiences/{id}` | Admin; full-field replacement |
//! | `DELETE` | `/api/experiences/{id}` | Admin |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use vitrine_core::{
  entity::{Experience, NewExperience},
  store::PortfolioStore,
};

use crate::{AppState, auth::AdminUser, error::Error, handlers::Message};

/// JSON body accepted by the create and update endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBody {
  pub position:         String,
  pub company:          String,
  pub start_date:       Option<DateTime<Utc>>,
  pub end_date:         Option<DateTime<Utc>>,
  pub description:      String,
  #[serde(default)]
  pub technologies:     Vec<String>,
  pub company_logo_url: Option<String>,
  #[serde(default)]
  pub published:        bool,
}

impl From<ExperienceBody> for NewExperience {
  fn from(b: ExperienceBody) -> Self {
    NewExperience {
      position:         b.position,
      company:          b.company,
      start_date:       b.start_date,
      end_date:         b.end_date,
      description:      b.description,
      technologies:     b.technologies,
      company_logo_url: b.company_logo_url,
      published:        b.published,
    }
  }
}

/// `GET /api/experiences`
pub async fn list_published<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Experience>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let experiences = state
    .store
    .list_experiences(true)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(experiences))
}

/// `GET /api/admin/experiences`
pub async fn list_all<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Experience>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let experiences = state
    .store
    .list_experiences(false)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(experiences))
}

/// `POST /api/experiences` — returns 201 + the stored experience.
pub async fn create<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Json(body): Json<ExperienceBody>,
) -> Result<impl IntoResponse, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let experience = state
    .store
    .add_experience(NewExperience::from(body))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(experience)))
}

/// `PUT /api/experiences/{id}`
pub async fn update<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ExperienceBody>,
) -> Result<Json<Experience>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let updated = state
    .store
    .update_experience(id, NewExperience::from(body))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Experience not found".to_string()))?;
  Ok(Json(updated))
}

/// `DELETE /api/experiences/{id}`
pub async fn delete<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Message>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_experience(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if !deleted {
    return Err(Error::NotFound("Experience not found".to_string()));
  }
  Ok(Message::new("Experience deleted successfully"))
}
