//! Statements (match targets) and the responses attached to them.
//!
//! Both texts are stored lower-cased; backends fold case on write.

use serde::{Deserialize, Serialize};

/// A canned line of dialogue attributed to a friend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
  pub id:        i64,
  pub friend_id: i64,
  pub username:  String,
  pub text:      String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStatement {
  pub friend_id: i64,
  pub username:  String,
  pub text:      String,
}

/// A canned reply tied to exactly one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
  pub id:           i64,
  pub statement_id: i64,
  pub username:     String,
  pub text:         String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResponse {
  pub statement_id: i64,
  pub username:     String,
  pub text:         String,
}

/// The `{id, text}` projection returned by [`ChatStore`] lookups.
///
/// [`ChatStore`]: crate::store::ChatStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
  pub id:   i64,
  pub text: String,
}

impl Line {
  pub fn new(id: i64, text: impl Into<String>) -> Self {
    Self { id, text: text.into() }
  }
}
