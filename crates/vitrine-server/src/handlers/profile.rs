//! Handlers for the portfolio owner's profile.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET` | `/api/profile` | Public subset of the admin account |
//! | `PUT` | `/api/admin/profile` | Admin only; full-field replacement |

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use vitrine_core::{
  store::PortfolioStore,
  user::{ProfileUpdate, UserProfile},
};

use crate::{AppState, auth::AdminUser, error::Error};

/// What anonymous visitors see of the owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
}

/// `GET /api/profile`
pub async fn public_profile<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<PublicProfile>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let admin = state
    .store
    .find_admin()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("Admin profile not found".to_string()))?;

  Ok(Json(PublicProfile {
    first_name:        admin.first_name,
    last_name:         admin.last_name,
    profile_image_url: admin.profile_image_url,
    hero_image_url:    admin.hero_image_url,
    linkedin_url:      admin.linkedin_url,
    github_url:        admin.github_url,
  }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
  pub first_name:        Option<String>,
  pub last_name:         Option<String>,
  pub profile_image_url: Option<String>,
  pub hero_image_url:    Option<String>,
  pub linkedin_url:      Option<String>,
  pub github_url:        Option<String>,
}

/// `PUT /api/admin/profile`
pub async fn update_profile<S>(
  AdminUser(admin): AdminUser,
  State(state): State<AppState<S>>,
  Json(body): Json<ProfileBody>,
) -> Result<Json<UserProfile>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let updated = state
    .store
    .update_profile(
      admin.id,
      ProfileUpdate {
        first_name:        body.first_name,
        last_name:         body.last_name,
        profile_image_url: body.profile_image_url,
        hero_image_url:    body.hero_image_url,
        linkedin_url:      body.linkedin_url,
        github_url:        body.github_url,
      },
    )
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

  Ok(Json(UserProfile::from(&updated)))
}
