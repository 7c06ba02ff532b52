//! Session-cookie authentication: token generation, cookie plumbing, and the
//! extractor guards handlers declare to state their auth requirements.
//!
//! The actor is resolved once per request from the session cookie and handed
//! to the handler as a typed value — never read from ambient state. Three
//! guards exist: [`MaybeUser`] (public endpoints that personalize),
//! [`CurrentUser`] (any signed-in account), and [`AdminUser`].

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use rand_core::{OsRng, RngCore as _};
use vitrine_core::{store::PortfolioStore, user::User};

use crate::{AppState, error::Error};

/// Cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "vitrine_session";

// ─── Tokens and cookies ──────────────────────────────────────────────────────

/// 32 random bytes from the OS, hex-encoded.
pub fn generate_token() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
  format!(
    "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
  )
}

pub fn clear_session_cookie() -> String {
  format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of the `Cookie` header, if present.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
  let raw = headers.get(header::COOKIE)?.to_str().ok()?;
  raw.split(';').map(str::trim).find_map(|pair| {
    pair
      .strip_prefix(SESSION_COOKIE)?
      .strip_prefix('=')
      .map(str::to_string)
  })
}

// ─── Password verification ───────────────────────────────────────────────────

/// Check a plaintext password against a stored argon2 PHC string.
/// Any failure (malformed hash included) reads as bad credentials.
pub fn verify_password(password: &str, phc: &str) -> Result<(), Error> {
  let parsed = PasswordHash::new(phc).map_err(|_| Error::Unauthorized)?;
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .map_err(|_| Error::Unauthorized)
}

// ─── Guards ──────────────────────────────────────────────────────────────────

/// The signed-in account, when the request carries a live session.
pub struct MaybeUser(pub Option<User>);

/// A signed-in account; rejects with 401 otherwise.
pub struct CurrentUser(pub User);

/// A signed-in admin; 401 when signed out, 403 for a non-admin account.
pub struct AdminUser(pub User);

async fn resolve_user<S>(
  headers: &HeaderMap,
  state:   &AppState<S>,
) -> Result<Option<User>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(token) = token_from_headers(headers) else {
    return Ok(None);
  };

  let session = state
    .store
    .get_session(token)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  let Some(session) = session else {
    return Ok(None);
  };

  state
    .store
    .get_user(session.user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))
}

impl<S> FromRequestParts<AppState<S>> for MaybeUser
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    Ok(MaybeUser(resolve_user(&parts.headers, state).await?))
  }
}

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    resolve_user(&parts.headers, state)
      .await?
      .map(CurrentUser)
      .ok_or(Error::Unauthorized)
  }
}

impl<S> FromRequestParts<AppState<S>> for AdminUser
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let user = resolve_user(&parts.headers, state)
      .await?
      .ok_or(Error::Unauthorized)?;
    if !user.is_admin {
      return Err(Error::Forbidden);
    }
    Ok(AdminUser(user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  fn headers_with_cookie(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
    headers
  }

  #[test]
  fn token_parsed_from_cookie_header() {
    let headers = headers_with_cookie("vitrine_session=abc123; theme=dark");
    assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
  }

  #[test]
  fn token_found_after_other_cookies() {
    let headers = headers_with_cookie("theme=dark; vitrine_session=abc123");
    assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
  }

  #[test]
  fn similarly_named_cookie_is_not_confused() {
    let headers = headers_with_cookie("vitrine_session_old=zzz");
    assert_eq!(token_from_headers(&headers), None);
  }

  #[test]
  fn missing_header_yields_none() {
    assert_eq!(token_from_headers(&HeaderMap::new()), None);
  }

  #[test]
  fn generated_tokens_are_long_and_distinct() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert_ne!(a, b);
  }

  #[test]
  fn password_verification_roundtrip() {
    use argon2::{PasswordHasher, password_hash::SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(b"secret", &salt)
      .unwrap()
      .to_string();

    assert!(verify_password("secret", &hash).is_ok());
    assert!(matches!(
      verify_password("wrong", &hash),
      Err(Error::Unauthorized)
    ));
    assert!(verify_password("secret", "not-a-phc-string").is_err());
  }
}
