//! Error types for `chum-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The storage collaborator failed; never produced by a fallback path.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn storage<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
