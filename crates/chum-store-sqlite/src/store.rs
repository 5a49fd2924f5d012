//! [`SqliteStore`] — the SQLite implementation of [`ChatStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use chum_core::{
  friend::{Friend, FriendScope, NewFriend},
  statement::{Line, NewResponse, NewStatement, Response, Statement},
  store::ChatStore,
};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A chum store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

fn friend_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Friend> {
  Ok(Friend {
    id:          row.get(0)?,
    username:    row.get(1)?,
    name:        row.get(2)?,
    description: row.get(3)?,
  })
}

fn line_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Line> {
  Ok(Line { id: row.get(0)?, text: row.get(1)? })
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Friends ───────────────────────────────────────────────────────────────

  pub async fn add_friend(&self, input: NewFriend) -> Result<Friend> {
    let NewFriend { username, name, description } = input;
    let (u, n, d) = (username.clone(), name.clone(), description.clone());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO friends (username, name, description) VALUES (?1, ?2, ?3)",
          rusqlite::params![u, n, d],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Friend { id, username, name, description })
  }

  /// All friends recorded by `owner`, oldest first.
  pub async fn list_friends(&self, owner: &str) -> Result<Vec<Friend>> {
    let owner = owner.to_owned();

    let friends = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, username, name, description FROM friends
           WHERE username = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![owner], friend_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(friends)
  }

  /// Look up one of `owner`'s friends by name, ignoring case. When several
  /// share a name the oldest wins.
  pub async fn find_friend(&self, owner: &str, name: &str) -> Result<Option<Friend>> {
    let owner = owner.to_owned();
    let name = name.to_owned();

    let friend = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, name, description FROM friends
               WHERE username = ?1 AND name = ?2 COLLATE NOCASE
               ORDER BY id LIMIT 1",
              rusqlite::params![owner, name],
              friend_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(friend)
  }

  // ── Statements & responses ────────────────────────────────────────────────

  /// Attach a statement to one of `input.username`'s friends. The text is
  /// stored lower-cased.
  pub async fn add_statement(&self, input: NewStatement) -> Result<Statement> {
    let NewStatement { friend_id, username, text } = input;
    let text = text.to_lowercase();
    let (u, t) = (username.clone(), text.clone());

    let id = self
      .conn
      .call(move |conn| {
        let owned = conn
          .query_row(
            "SELECT 1 FROM friends WHERE id = ?1 AND username = ?2",
            rusqlite::params![friend_id, u],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !owned {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO statements (friend_id, username, statement) VALUES (?1, ?2, ?3)",
          rusqlite::params![friend_id, u, t],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?
      .ok_or(Error::FriendNotFound(friend_id))?;

    Ok(Statement { id, friend_id, username, text })
  }

  /// Attach a response to one of `input.username`'s statements. The text is
  /// stored lower-cased.
  pub async fn add_response(&self, input: NewResponse) -> Result<Response> {
    let NewResponse { statement_id, username, text } = input;
    let text = text.to_lowercase();
    let (u, t) = (username.clone(), text.clone());

    let id = self
      .conn
      .call(move |conn| {
        let owned = conn
          .query_row(
            "SELECT 1 FROM statements WHERE id = ?1 AND username = ?2",
            rusqlite::params![statement_id, u],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !owned {
          return Ok(None);
        }

        conn.execute(
          "INSERT INTO responses (statement_id, username, response) VALUES (?1, ?2, ?3)",
          rusqlite::params![statement_id, u, t],
        )?;
        Ok(Some(conn.last_insert_rowid()))
      })
      .await?
      .ok_or(Error::StatementNotFound(statement_id))?;

    Ok(Response { id, statement_id, username, text })
  }

  /// Delete one of `owner`'s statements together with its responses.
  pub async fn delete_statement(&self, owner: &str, id: i64) -> Result<()> {
    let owner = owner.to_owned();

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM statements WHERE id = ?1 AND username = ?2",
          rusqlite::params![id, owner],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::StatementNotFound(id));
    }
    Ok(())
  }
}

// ─── ChatStore impl ──────────────────────────────────────────────────────────

impl ChatStore for SqliteStore {
  type Error = Error;

  async fn find_statements(&self, scope: &FriendScope, keyword: &str) -> Result<Vec<Line>> {
    let friend_id = scope.friend_id;
    let owner = scope.owner.clone();
    let keyword = keyword.to_owned();

    let lines = self
      .conn
      .call(move |conn| {
        // instr() is a plain substring test; keywords need no LIKE escaping.
        let mut stmt = conn.prepare(
          "SELECT s.id, s.statement
           FROM statements s
           JOIN friends f ON f.id = s.friend_id
           WHERE s.friend_id = ?1
             AND f.username  = ?2
             AND instr(s.statement, ?3) > 0
           ORDER BY s.id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![friend_id, owner, keyword], line_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(lines)
  }

  async fn find_responses(&self, statement_id: i64) -> Result<Vec<Line>> {
    let lines = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, response FROM responses WHERE statement_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![statement_id], line_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(lines)
  }
}
