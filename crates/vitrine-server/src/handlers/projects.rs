//! Handlers for `/api/projects` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/api/projects` | Published only |
//! | `GET` | `/api/projects/featured` | Published and featured |
//! | `GET` | `/api/projects/{id}` | 404 if not found |
//! | `GET` | `/api/projects/slug/{slug}` | 404 if not found |
//! | `GET` | `/api/admin/projects` | Admin; drafts included |
//! | `POST` | `/api/projects` | Admin; derives a unique slug from the title |
//! | `PUT` | `/api/projects/{id}` | Admin; recomputes the slug when the title changes |
//! | `DELETE` | `/api/projects/{id}` | Admin |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;
use vitrine_core::{
  entity::{NewProject, Project, ProjectFilter},
  slug::{SlugKind, make_unique_slug, slugify},
  store::PortfolioStore,
};

use crate::{AppState, auth::AdminUser, error::Error, handlers::Message};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
  pub title:        String,
  pub description:  String,
  pub image_url:    Option<String>,
  pub github_url:   Option<String>,
  pub live_url:     Option<String>,
  #[serde(default)]
  pub technologies: Vec<String>,
  #[serde(default)]
  pub featured:     bool,
  #[serde(default)]
  pub published:    bool,
}

impl From<ProjectBody> for NewProject {
  fn from(b: ProjectBody) -> Self {
    NewProject {
      title:        b.title,
      description:  b.description,
      image_url:    b.image_url,
      github_url:   b.github_url,
      live_url:     b.live_url,
      technologies: b.technologies,
      featured:     b.featured,
      published:    b.published,
    }
  }
}

/// Slug base for a title, rejecting titles with no usable characters.
fn slug_base(title: &str) -> Result<String, Error> {
  let base = slugify(title);
  if base.is_empty() {
    return Err(Error::Validation(
      "title must contain at least one letter or digit".to_string(),
    ));
  }
  Ok(base)
}

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /api/projects`
pub async fn list_published<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let projects = state
    .store
    .list_projects(ProjectFilter { published_only: true, featured_only: false })
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(projects))
}

/// `GET /api/projects/featured`
pub async fn list_featured<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let projects = state
    .store
    .list_projects(ProjectFilter { published_only: true, featured_only: true })
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(projects))
}

/// `GET /api/admin/projects`
pub async fn list_all<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<Project>>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let projects = state
    .store
    .list_projects(ProjectFilter::default())
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(projects))
}

/// `GET /api/projects/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Project>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let project = state
    .store
    .get_project(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
  Ok(Json(project))
}

/// `GET /api/projects/slug/{slug}`
pub async fn get_by_slug<S>(
  State(state): State<AppState<S>>,
  Path(slug): Path<String>,
) -> Result<Json<Project>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let project = state
    .store
    .get_project_by_slug(slug)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
  Ok(Json(project))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /api/projects` — returns 201 + the stored project.
pub async fn create<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Json(body): Json<ProjectBody>,
) -> Result<impl IntoResponse, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let base = slug_base(&body.title)?;
  let slug = make_unique_slug(state.store.as_ref(), SlugKind::Project, &base, None)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let project = state
    .store
    .add_project(NewProject::from(body), slug)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(project)))
}

/// `PUT /api/projects/{id}` — full-field replacement. The slug is recomputed
/// (excluding this record from the collision probe) only when the title
/// changed.
pub async fn update<S>(
  _admin: AdminUser,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ProjectBody>,
) -> Result<Json<Project>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let existing = state
    .store
    .get_project(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;

  let slug = if existing.title == body.title {
    existing.slug
  } else {
    let base = slug_base(&body.title)?;
    make_unique_slug(state.store.as_ref(), SlugKind::Project, &base, Some(id))
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
  };

  let updated = state
    .store
    .update_project(id, NewProject::from(body), slug)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Project not found".to_string()))?;
  Ok(Json(updated))
}

/// `DELETE /api/projects/{id}`
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
    .delete_project(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  if !deleted {
    return Err(Error::NotFound("Project not found".to_string()));
  }
  Ok(Message::new("Project deleted successfully"))
}
