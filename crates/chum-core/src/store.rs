//! The `ChatStore` trait.
//!
//! Implemented by storage backends (e.g. `chum-store-sqlite`). The engine
//! only reads; creating and deleting friends, statements, and responses is
//! the backend's own business.

use std::future::Future;

use crate::{friend::FriendScope, statement::Line};

/// Read-only lookups consumed by [`select_response`](crate::select_response).
///
/// Both methods must tolerate concurrent deletes: a statement removed
/// between calls simply yields no rows.
pub trait ChatStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Statements of `scope.friend_id` whose text contains `keyword` as a
  /// substring. `keyword` is already lower-cased. Returns an empty list
  /// when the friend does not exist or is not owned by `scope.owner`.
  fn find_statements<'a>(
    &'a self,
    scope: &'a FriendScope,
    keyword: &'a str,
  ) -> impl Future<Output = Result<Vec<Line>, Self::Error>> + Send + 'a;

  /// All responses attached to `statement_id`.
  fn find_responses(
    &self,
    statement_id: i64,
  ) -> impl Future<Output = Result<Vec<Line>, Self::Error>> + Send + '_;
}
