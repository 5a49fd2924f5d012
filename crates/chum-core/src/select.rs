//! Response selector: turns chat input into one of a friend's canned replies.
//!
//! One keyword is sampled from the normalized input; the friend's statements
//! containing it are shuffled once and walked in that order until one with at
//! least one response turns up. Each statement is queried at most once, so
//! the walk always terminates.

use std::{collections::HashSet, fmt};

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use tracing::debug;

use crate::{Error, Result, friend::FriendScope, normalize::normalize, store::ChatStore};

pub const NOTHING_IMPORTANT: &str = "You didn't say anything important";
pub const NO_RESPONSE: &str = "I have no response";

// ─── Reply ───────────────────────────────────────────────────────────────────

/// Outcome of a single selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Reply {
  /// A stored response, verbatim.
  Matched(String),
  /// The input had no usable keywords. No storage access happened.
  NothingImportant,
  /// No statement matched, or none of the matches had a response.
  NoResponse,
}

impl Reply {
  /// The text shown to the user.
  pub fn text(&self) -> &str {
    match self {
      Self::Matched(text) => text,
      Self::NothingImportant => NOTHING_IMPORTANT,
      Self::NoResponse => NO_RESPONSE,
    }
  }

  pub fn is_fallback(&self) -> bool { !matches!(self, Self::Matched(_)) }

  pub fn into_text(self) -> String {
    match self {
      Self::Matched(text) => text,
      other => other.text().to_owned(),
    }
  }
}

impl fmt::Display for Reply {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.text())
  }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Pick a response for `text` from the friend identified by `scope`.
///
/// The caller is expected to have authorized `scope.owner` already; an
/// unknown or foreign scope is indistinguishable from a friend with no
/// matching statements. Storage failures surface as [`Error::Storage`].
pub async fn select_response<S, R>(
  store: &S,
  rng: &mut R,
  scope: &FriendScope,
  text: &str,
) -> Result<Reply>
where
  S: ChatStore,
  R: Rng + Send + ?Sized,
{
  let keywords = normalize(text);
  let Some(keyword) = keywords.choose(rng) else {
    return Ok(Reply::NothingImportant);
  };
  debug!(keyword, candidates = keywords.len(), friend_id = scope.friend_id, "sampled keyword");

  let statements = store
    .find_statements(scope, keyword)
    .await
    .map_err(Error::storage)?;

  let mut seen = HashSet::with_capacity(statements.len());
  let mut ids: Vec<i64> = statements
    .into_iter()
    .map(|s| s.id)
    .filter(|id| seen.insert(*id))
    .collect();
  debug!(keyword, matches = ids.len(), "matched statements");

  ids.shuffle(rng);

  for statement_id in ids {
    let responses = store
      .find_responses(statement_id)
      .await
      .map_err(Error::storage)?;

    if let Some(response) = responses.choose(rng) {
      return Ok(Reply::Matched(response.text.clone()));
    }
    debug!(statement_id, "statement has no responses, trying next");
  }

  Ok(Reply::NoResponse)
}
