//! SQL schema for the chum SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS friends (
    id          INTEGER PRIMARY KEY,
    username    TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

-- Text is lower-cased on insert so substring matching needs no folding.
CREATE TABLE IF NOT EXISTS statements (
    id        INTEGER PRIMARY KEY,
    friend_id INTEGER NOT NULL REFERENCES friends(id) ON DELETE CASCADE,
    username  TEXT NOT NULL,
    statement TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS responses (
    id           INTEGER PRIMARY KEY,
    statement_id INTEGER NOT NULL REFERENCES statements(id) ON DELETE CASCADE,
    username     TEXT NOT NULL,
    response     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS friends_username_idx     ON friends(username);
CREATE INDEX IF NOT EXISTS statements_friend_idx    ON statements(friend_id);
CREATE INDEX IF NOT EXISTS responses_statement_idx  ON responses(statement_id);

PRAGMA user_version = 1;
";
