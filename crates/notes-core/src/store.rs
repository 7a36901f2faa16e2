//! The `NoteStore` trait.
//!
//! Implemented by storage backends (e.g. `notes-store-sqlite`). The HTTP layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::note::{NewNote, Note};

/// Abstraction over a notes backend.
///
/// Each operation is a single statement against the store and is atomic on
/// its own. Notes are never updated in place.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait NoteStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All notes, newest first.
  ///
  /// Ordered by `created_at` descending; notes with equal timestamps are
  /// returned most-recently-inserted first. No pagination.
  fn get_notes(&self) -> impl Future<Output = Result<Vec<Note>, Self::Error>> + Send + '_;

  /// Persist `input` and return the stored note, including its generated `id`
  /// and `created_at`.
  fn create_note(
    &self,
    input: NewNote,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + '_;

  /// Remove the note with `id`. Deleting an id that does not exist succeeds.
  fn delete_note(&self, id: i64) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
