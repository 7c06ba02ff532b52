//! Handlers for `/api/achievements` endpoints.
//!
//! Same shape as projects: slugged, published-filtered, admin-gated writes.

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
  entity::{Achievement, NewAchievement},
  slug::{SlugKind, make_unique_slug, slugify},
  store::PortfolioStore,
};

use crate::{AppState, auth::AdminUser, error::Error, handlers::Message};

/// JSON body accepted by the create and update endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementBody {
  pub title:           String,
  pub description:     String,
  pub date:            Option<DateTime<Utc>>,
  #[serde(rename = "type")]
  pub kind:            Option<String>,
  pub certificate_url: Option<String>,
  pub badge_image_url: Option<String>,
  #[serde(default)]
  pub published:       bool,
}

impl From<AchievementBody> for NewAchievement {
  fn from(b: AchievementBody) -> Self {
    NewAchievement {
      title:           b.title,
      description:     b.description,
      date:            b.date,
      kind:            b.kind,
      certificate_url: b.certificate_url,
      badge_image_url: b.badge_image_url,
      published:       b.published,
    }
  }
}

fn slug_base(title: &str) -> Result<String, Error> {
  let base = slugify(title);
  if base.is_empty() {
    return Err(Error::Validation(
      "title must contain at least one letter or digit".to_string(),
    ));
  }
  Ok(base)
}

/// `GET /api/achievements`
pub async fn list_published<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Achievement>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let achievements = state
    .store
    .list_achievements(true)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(achievements))
}

/// `GET /api/admin/achievements`
pub async fn list_all<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Achievement>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let achievements = state
    .store
    .list_achievements(false)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(achievements))
}

/// `POST /api/achievements` — returns 201 + the stored achievement.
pub async fn create<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Json(body): Json<AchievementBody>,
) -> Result<impl IntoResponse, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let base = slug_base(&body.title)?;
  let slug =
    make_unique_slug(state.store.as_ref(), SlugKind::Achievement, &base, None)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

  let achievement = state
    .store
    .add_achievement(NewAchievement::from(body), slug)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(achievement)))
}

/// `PUT /api/achievements/{id}` — slug recomputed only on a title change.
pub async fn update<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AchievementBody>,
) -> Result<Json<Achievement>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let existing = state
    .store
    .get_achievement(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Achievement not found".to_string()))?;

  let slug = if existing.title == body.title {
    existing.slug
  } else {
    let base = slug_base(&body.title)?;
    make_unique_slug(state.store.as_ref(), SlugKind::Achievement, &base, Some(id))
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
  };

  let updated = state
    .store
    .update_achievement(id, NewAchievement::from(body), slug)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Achievement not found".to_string()))?;
  Ok(Json(updated))
}

/// `DELETE /api/achievements/{id}`
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
    .delete_achievement(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if !deleted {
    return Err(Error::NotFound("Achievement not found".to_string()));
  }
  Ok(Message::new("Achievement deleted successfully"))
}
