//! HTTP layer for the Vitrine portfolio backend.
//!
//! Exposes an axum [`Router`] implementing the JSON API backed by any
//! [`PortfolioStore`], plus static serving for uploaded files and the
//! single-page frontend.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod uploads;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post, put},
};
use serde::Deserialize;
use tower_http::{
  cors::CorsLayer,
  services::{ServeDir, ServeFile},
  trace::TraceLayer,
};
use vitrine_core::store::PortfolioStore;

use uploads::UploadStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `VITRINE_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub store_path:          PathBuf,
  pub upload_dir:          PathBuf,
  pub upload_max_bytes:    usize,
  /// Directory holding the built SPA (`index.html` and assets).
  pub static_dir:          PathBuf,
  pub admin_email:         String,
  /// PHC string for the bootstrapped admin account; generate one with
  /// `--hash-password`.
  pub admin_password_hash: String,
  pub session_ttl_hours:   i64,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: PortfolioStore> {
  pub store:   Arc<S>,
  pub config:  Arc<ServerConfig>,
  pub uploads: Arc<UploadStore>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: `/api/*` JSON endpoints, `/uploads/*`
/// file serving, and the SPA fallback for everything else.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  use axum::routing::delete as del;
  use handlers::{achievements, auth, comments, content, experiences, likes,
                 profile, projects, uploads as upload_handlers};

  let api = Router::new()
    // Auth
    .route("/login",         post(auth::login::<S>))
    .route("/logout",        post(auth::logout::<S>))
    .route("/auth/user",     get(auth::current_user))
    // Profile
    .route("/profile",       get(profile::public_profile::<S>))
    .route("/admin/profile", put(profile::update_profile::<S>))
    // Projects
    .route("/projects",
      get(projects::list_published::<S>).post(projects::create::<S>))
    .route("/projects/featured",    get(projects::list_featured::<S>))
    .route("/projects/slug/{slug}", get(projects::get_by_slug::<S>))
    .route("/projects/{id}",
      get(projects::get_one::<S>)
        .put(projects::update::<S>)
        .delete(projects::delete::<S>))
    .route("/admin/projects", get(projects::list_all::<S>))
    // Experiences
    .route("/experiences",
      get(experiences::list_published::<S>).post(experiences::create::<S>))
    .route("/experiences/{id}",
      put(experiences::update::<S>).delete(experiences::delete::<S>))
    .route("/admin/experiences", get(experiences::list_all::<S>))
    // Achievements
    .route("/achievements",
      get(achievements::list_published::<S>).post(achievements::create::<S>))
    .route("/achievements/{id}",
      put(achievements::update::<S>).delete(achievements::delete::<S>))
    .route("/admin/achievements", get(achievements::list_all::<S>))
    // Comments and the contact board
    .route("/comments",                      post(comments::create::<S>))
    .route("/comments/{item_type}/{item_id}", get(comments::list_for_item::<S>))
    .route("/admin/comments/{id}",           del(comments::delete::<S>))
    .route("/contact",                       post(comments::contact::<S>))
    .route("/contact/comments",              get(comments::recent_contact::<S>))
    // Likes
    .route("/likes",                        post(likes::toggle::<S>))
    .route("/likes/{item_type}/{item_id}",  get(likes::status::<S>))
    // Site content
    .route("/content", get(content::list::<S>).post(content::update::<S>))
    // Uploads
    .route("/upload", post(upload_handlers::upload::<S>))
    .fallback(handlers::api_not_found);

  let upload_dir = state.config.upload_dir.clone();
  let static_dir = state.config.static_dir.clone();
  let index_html = static_dir.join("index.html");
  // Leave headroom above the upload cap for multipart framing.
  let body_limit = state.config.upload_max_bytes + 64 * 1024;

  Router::new()
    .nest("/api", api)
    .nest_service("/uploads", ServeDir::new(upload_dir))
    .fallback_service(
      ServeDir::new(&static_dir).not_found_service(ServeFile::new(index_html)),
    )
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(CorsLayer::very_permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
