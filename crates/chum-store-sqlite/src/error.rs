//! Error type for `chum-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The friend does not exist or belongs to another user.
  #[error("friend not found: {0}")]
  FriendNotFound(i64),

  /// The statement does not exist or belongs to another user.
  #[error("statement not found: {0}")]
  StatementNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
