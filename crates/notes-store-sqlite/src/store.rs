//! [`SqliteStore`] — the SQLite implementation of [`NoteStore`].

use std::path::Path;

use chrono::Utc;

use notes_core::{
  note::{NewNote, Note},
  store::NoteStore,
};

use crate::{
  Result,
  encode::{NOTE_COLUMNS, RawNote, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A notes store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
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
}

// ─── NoteStore impl ──────────────────────────────────────────────────────────

impl NoteStore for SqliteStore {
  type Error = crate::Error;

  async fn get_notes(&self) -> Result<Vec<Note>> {
    let raws: Vec<RawNote> = self
      .conn
      .call(|conn| {
        // SQLite sorts NULL lowest, so rows without a timestamp come last.
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTE_COLUMNS} FROM notes ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawNote::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }

  async fn create_note(&self, input: NewNote) -> Result<Note> {
    let created_at = encode_dt(Utc::now());

    let raw: RawNote = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO notes (title, content, created_at) VALUES (?1, ?2, ?3)
             RETURNING {NOTE_COLUMNS}"
          ),
          rusqlite::params![input.title, input.content, created_at],
          RawNote::from_row,
        )?)
      })
      .await?;

    raw.into_note()
  }

  async fn delete_note(&self, id: i64) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM notes WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
