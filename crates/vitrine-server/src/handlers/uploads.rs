//! Handler for `POST /api/upload` (admin, multipart).
//!
//! The binary lands in the [`crate::uploads::UploadStore`]; the metadata row
//! goes through the portfolio store and is returned as the response body.

use axum::{
  Json,
  extract::{Multipart, State},
};
use vitrine_core::{
  store::PortfolioStore,
  upload::{NewStoredFile, StoredFile},
};

use crate::{AppState, auth::AdminUser, error::Error};

/// `POST /api/upload` — expects a multipart part named `file`.
pub async fn upload<S>(
  AdminUser(admin): AdminUser,
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<Json<StoredFile>, Error>
where
  S: PortfolioStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  while let Some(field) = multipart
    .next_field()
    .await
    .map_err(|e| Error::BadRequest(e.to_string()))?
  {
    if field.name() != Some("file") {
      continue;
    }

    let original_name = field.file_name().unwrap_or_default().to_string();
    let mime_type = field
      .content_type()
      .unwrap_or("application/octet-stream")
      .to_string();
    let data = field
      .bytes()
      .await
      .map_err(|e| Error::BadRequest(e.to_string()))?;

    let saved = state.uploads.save(&original_name, &data).await?;

    let file = state
      .store
      .add_file(NewStoredFile {
        filename:      saved.filename,
        original_name,
        mime_type,
        size_bytes:    data.len() as u64,
        url:           saved.url,
        uploaded_by:   admin.id,
      })
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    return Ok(Json(file));
  }

  Err(Error::Validation("No file part".to_string()))
}
