//! Bulk-loading a corpus of friends, statements and responses from JSON.
//!
//! ```json
//! {
//!   "owner": "alice",
//!   "friends": [
//!     {
//!       "name": "Tom",
//!       "description": "my cat-obsessed neighbour",
//!       "statements": [
//!         { "text": "The cat sat on the mat", "responses": ["meow"] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::Context as _;
use chum_core::{
  friend::NewFriend,
  statement::{NewResponse, NewStatement},
};
use chum_store_sqlite::SqliteStore;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Corpus {
  pub owner:   String,
  #[serde(default)]
  pub friends: Vec<FriendEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FriendEntry {
  pub name:        String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub statements:  Vec<StatementEntry>,
}

#[derive(Debug, Deserialize)]
pub struct StatementEntry {
  pub text:      String,
  #[serde(default)]
  pub responses: Vec<String>,
}

/// Counts of rows written by [`import`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Imported {
  pub friends:    usize,
  pub statements: usize,
  pub responses:  usize,
}

pub fn read_corpus(path: &Path) -> anyhow::Result<Corpus> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading corpus {}", path.display()))?;
  serde_json::from_str(&raw).with_context(|| format!("parsing corpus {}", path.display()))
}

/// Write `corpus` into `store`. Friends are always created fresh, so importing
/// the same file twice yields duplicate friends.
pub async fn import(store: &SqliteStore, corpus: Corpus) -> anyhow::Result<Imported> {
  let Corpus { owner, friends } = corpus;
  let mut counts = Imported::default();

  for entry in friends {
    let friend = store
      .add_friend(NewFriend {
        username:    owner.clone(),
        name:        entry.name,
        description: entry.description,
      })
      .await?;
    counts.friends += 1;

    for st in entry.statements {
      let statement = store
        .add_statement(NewStatement {
          friend_id: friend.id,
          username:  owner.clone(),
          text:      st.text,
        })
        .await?;
      counts.statements += 1;

      for text in st.responses {
        store
          .add_response(NewResponse {
            statement_id: statement.id,
            username: owner.clone(),
            text,
          })
          .await?;
        counts.responses += 1;
      }
    }

    tracing::info!(friend = %friend.name, id = friend.id, "imported friend");
  }

  Ok(counts)
}

#[cfg(test)]
mod tests {
  use chum_core::{friend::FriendScope, store::ChatStore};

  use super::*;

  const CORPUS: &str = r#"{
    "owner": "u1",
    "friends": [
      {
        "name": "Tom",
        "statements": [
          { "text": "The Cat sat", "responses": ["Meow", "purr"] },
          { "text": "lonely line" }
        ]
      },
      { "name": "Ann", "description": "quiet" }
    ]
  }"#;

  #[tokio::test]
  async fn imports_whole_corpus() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let corpus: Corpus = serde_json::from_str(CORPUS).unwrap();

    let counts = import(&store, corpus).await.unwrap();
    assert_eq!(counts, Imported { friends: 2, statements: 2, responses: 2 });

    let friends = store.list_friends("u1").await.unwrap();
    assert_eq!(friends.len(), 2);
    assert_eq!(friends[1].description, "quiet");

    let tom = FriendScope::new(friends[0].id, "u1");
    let hits = store.find_statements(&tom, "cat").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].text, "the cat sat");

    let responses = store.find_responses(hits[0].id).await.unwrap();
    let texts: Vec<_> = responses.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["meow", "purr"]);
  }

  #[test]
  fn owner_is_required() {
    assert!(serde_json::from_str::<Corpus>(r#"{ "friends": [] }"#).is_err());
  }
}
