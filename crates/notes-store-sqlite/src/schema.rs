//! SQL schema for the notes SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `AUTOINCREMENT` keeps ids of deleted notes from being handed out again.
/// The store always writes `created_at` itself; the column default only
/// covers rows inserted by other tools. SQLite's `%f` has millisecond
/// precision, so the default pads it to the store's six-digit fraction.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS notes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    created_at  TEXT DEFAULT (strftime('%Y-%m-%dT%H:%M:%f000Z', 'now'))  -- RFC 3339 UTC, micros
);

CREATE INDEX IF NOT EXISTS notes_created_idx ON notes(created_at);

PRAGMA user_version = 1;
";
