//! Handlers for `/api/likes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/likes` | Signed-in only; body `{"itemType","itemId"}`; toggles |
//! | `GET`  | `/api/likes/{itemType}/{itemId}` | Public; viewer resolved from session if any |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use vitrine_core::{
  interaction::{ItemKind, ItemRef, LikeStatus},
  store::PortfolioStore,
};

use crate::{
  AppState,
  auth::{CurrentUser, MaybeUser},
  error::Error,
};

/// Both fields optional so a missing one reports as a 400 with the expected
/// message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBody {
  pub item_type: Option<ItemKind>,
  pub item_id:   Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
  pub liked:   bool,
  pub message: &'static str,
}

/// `POST /api/likes` — alternating toggle: repeated calls with the same item
/// flip the state back and forth.
pub async fn toggle<S>(
  CurrentUser(user): CurrentUser,
  State(state): State<AppState<S>>,
  Json(body): Json<ToggleBody>,
) -> Result<Json<ToggleResponse>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (Some(item_type), Some(item_id)) = (body.item_type, body.item_id) else {
    return Err(Error::Validation(
      "itemType and itemId are required".to_string(),
    ));
  };

  let liked = state
    .store
    .toggle_like(user.id, ItemRef::new(item_type, item_id))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  Ok(Json(ToggleResponse {
    liked,
    message: if liked { "Like added" } else { "Like removed" },
  }))
}

/// `GET /api/likes/{itemType}/{itemId}`
pub async fn status<S>(
  MaybeUser(viewer): MaybeUser,
  State(state): State<AppState<S>>,
  Path((item_type, item_id)): Path<(ItemKind, String)>,
) -> Result<Json<LikeStatus>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let status = state
    .store
    .like_status(ItemRef::new(item_type, item_id), viewer.map(|u| u.id))
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(status))
}
