//! JSON route handlers, one module per resource.

pub mod achievements;
pub mod auth;
pub mod comments;
pub mod content;
pub mod experiences;
pub mod likes;
pub mod profile;
pub mod projects;
pub mod uploads;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// The `{"message": ...}` acknowledgement body used by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
  pub message: &'static str,
}

impl Message {
  pub fn new(message: &'static str) -> Json<Self> { Json(Self { message }) }
}

/// Fallback for unknown `/api/*` paths — JSON, not the SPA shell.
pub async fn api_not_found() -> impl IntoResponse {
  (
    StatusCode::NOT_FOUND,
    Message::new("API endpoint not found"),
  )
}
