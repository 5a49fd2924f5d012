//! Friend: a user-defined persona that owns a corpus of statements.

use serde::{Deserialize, Serialize};

/// A persona recorded by `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
  pub id:          i64,
  /// The owning user.
  pub username:    String,
  pub name:        String,
  pub description: String,
}

/// Input for creating a [`Friend`]; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFriend {
  pub username:    String,
  pub name:        String,
  #[serde(default)]
  pub description: String,
}

/// The pair every chat lookup is restricted to.
///
/// A scope whose friend is not owned by `owner` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FriendScope {
  pub friend_id: i64,
  pub owner:     String,
}

impl FriendScope {
  pub fn new(friend_id: i64, owner: impl Into<String>) -> Self {
    Self { friend_id, owner: owner.into() }
  }
}
