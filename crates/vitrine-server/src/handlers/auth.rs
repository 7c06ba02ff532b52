//! Handlers for login, logout, and the current-user probe.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/login` | Body: `{"email","password"}`; sets the session cookie |
//! | `POST` | `/api/logout` | Deletes the session and clears the cookie |
//! | `GET`  | `/api/auth/user` | 401 without a live session |

use axum::{
  Json,
  extract::State,
  http::{HeaderValue, HeaderMap, header},
  response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use vitrine_core::{store::PortfolioStore, user::UserProfile};

use crate::{
  AppState,
  auth::{
    CurrentUser, clear_session_cookie, generate_token, session_cookie,
    token_from_headers, verify_password,
  },
  error::Error,
  handlers::Message,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub message: &'static str,
  pub user:    UserProfile,
}

/// `POST /api/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Response, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user_by_email(body.email)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::Unauthorized)?;

  verify_password(&body.password, &user.password_hash)?;

  let token = generate_token();
  let ttl = Duration::hours(state.config.session_ttl_hours);
  state
    .store
    .add_session(token.clone(), user.id, Utc::now() + ttl)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let cookie = HeaderValue::from_str(&session_cookie(&token, ttl.num_seconds()))
    .map_err(|e| Error::Internal(e.to_string()))?;

  let mut response = Json(LoginResponse {
    message: "Login successful",
    user:    UserProfile::from(&user),
  })
  .into_response();
  response.headers_mut().insert(header::SET_COOKIE, cookie);
  Ok(response)
}

/// `POST /api/logout` — valid for signed-out callers too; always clears the
/// cookie.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(token) = token_from_headers(&headers) {
    state
      .store
      .delete_session(token)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
  }

  let cookie = HeaderValue::from_str(&clear_session_cookie())
    .map_err(|e| Error::Internal(e.to_string()))?;

  let mut response = Message::new("Logout successful").into_response();
  response.headers_mut().insert(header::SET_COOKIE, cookie);
  Ok(response)
}

/// `GET /api/auth/user`
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
  Json(UserProfile::from(&user))
}
