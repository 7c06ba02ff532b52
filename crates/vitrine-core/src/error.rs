//! Error types for `vitrine-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied input failed a structural check (empty comment content,
  /// anonymous author without name/email, title that slugifies to nothing).
  /// Reported to HTTP clients as a 400; never retried.
  #[error("validation error: {0}")]
  Validation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
