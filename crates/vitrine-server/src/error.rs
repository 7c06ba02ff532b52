//! Error types and axum `IntoResponse` implementation.
//!
//! Every variant maps to exactly one status code and a `{"message": ...}`
//! JSON body — the shape the frontend expects on every failure.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,

  #[error("admin access required")]
  Forbidden,

  #[error("not found: {0}")]
  NotFound(String),

  /// Caller input failed a structural check; never retried.
  #[error("validation error: {0}")]
  Validation(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<vitrine_core::Error> for Error {
  fn from(e: vitrine_core::Error) -> Self {
    match e {
      vitrine_core::Error::Validation(msg) => Error::Validation(msg),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
      Error::Forbidden => {
        (StatusCode::FORBIDDEN, "Admin access required".to_string())
      }
      Error::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      Error::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
      Error::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      Error::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      Error::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
      Error::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}
