//! [`UploadStore`] — validated file persistence for the upload endpoint.
//!
//! Files land on disk under a random hex name that preserves only the
//! (allow-listed) extension of the original, so nothing caller-controlled
//! ever reaches the filesystem path.

use std::path::{Path, PathBuf};

use rand_core::{OsRng, RngCore as _};
use tokio::fs;
use tracing::{debug, info};

use crate::error::Error;

/// Extensions accepted by [`UploadStore::save`], lowercase.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "pdf"];

/// Outcome of a successful save: the on-disk name and the public URL path.
#[derive(Debug, Clone)]
pub struct SavedUpload {
  pub filename: String,
  pub url:      String,
}

#[derive(Debug)]
pub struct UploadStore {
  dir:       PathBuf,
  max_bytes: usize,
}

impl UploadStore {
  /// Ensure the upload directory exists and wrap it.
  pub async fn new(dir: PathBuf, max_bytes: usize) -> Result<Self, Error> {
    fs::create_dir_all(&dir).await?;
    info!(path = %dir.display(), "upload store initialised");
    Ok(Self { dir, max_bytes })
  }

  pub fn dir(&self) -> &Path { &self.dir }

  /// Validate and write one uploaded file.
  pub async fn save(
    &self,
    original_name: &str,
    data: &[u8],
  ) -> Result<SavedUpload, Error> {
    if original_name.is_empty() {
      return Err(Error::Validation("No file selected".to_string()));
    }
    if data.is_empty() {
      return Err(Error::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > self.max_bytes {
      return Err(Error::Validation("File too large".to_string()));
    }

    let ext = allowed_extension(original_name)
      .ok_or_else(|| Error::Validation("File type not allowed".to_string()))?;

    let filename = format!("{}.{ext}", random_hex(8));
    fs::write(self.dir.join(&filename), data).await?;

    debug!(filename, size = data.len(), "stored upload");
    Ok(SavedUpload {
      url: format!("/uploads/{filename}"),
      filename,
    })
  }
}

/// The lowercased extension of `name`, if it is on the allowlist.
fn allowed_extension(name: &str) -> Option<String> {
  let (_, ext) = name.rsplit_once('.')?;
  let ext = ext.to_ascii_lowercase();
  ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn random_hex(bytes: usize) -> String {
  let mut buf = vec![0u8; bytes];
  OsRng.fill_bytes(&mut buf);
  hex::encode(buf)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  async fn test_store() -> (UploadStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = UploadStore::new(dir.path().to_path_buf(), 1024)
      .await
      .unwrap();
    (store, dir)
  }

  #[tokio::test]
  async fn save_writes_under_random_name() {
    let (store, _dir) = test_store().await;

    let saved = store.save("screenshot.PNG", b"fake-image").await.unwrap();
    assert!(saved.filename.ends_with(".png"));
    assert_eq!(saved.url, format!("/uploads/{}", saved.filename));
    // The original basename never reaches the disk.
    assert!(!saved.filename.contains("screenshot"));

    let on_disk = tokio::fs::read(store.dir().join(&saved.filename))
      .await
      .unwrap();
    assert_eq!(on_disk, b"fake-image");
  }

  #[tokio::test]
  async fn distinct_saves_get_distinct_names() {
    let (store, _dir) = test_store().await;
    let a = store.save("a.png", b"one").await.unwrap();
    let b = store.save("a.png", b"two").await.unwrap();
    assert_ne!(a.filename, b.filename);
  }

  #[tokio::test]
  async fn disallowed_extension_rejected() {
    let (store, _dir) = test_store().await;
    for name in ["evil.exe", "script.sh", "noextension", "archive.tar.xz"] {
      let err = store.save(name, b"data").await.unwrap_err();
      assert!(matches!(err, Error::Validation(_)), "{name} should be rejected");
    }
  }

  #[tokio::test]
  async fn oversized_upload_rejected() {
    let (store, _dir) = test_store().await;
    let big = vec![0u8; 2048];
    assert!(matches!(
      store.save("big.png", &big).await,
      Err(Error::Validation(_))
    ));
  }

  #[tokio::test]
  async fn empty_upload_rejected() {
    let (store, _dir) = test_store().await;
    assert!(store.save("empty.png", b"").await.is_err());
    assert!(store.save("", b"data").await.is_err());
  }
}
