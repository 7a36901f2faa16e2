//! Handlers for the `/api/notes` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/api/notes`     | 200 + every note, newest first |
//! | `POST`   | `/api/notes`     | Body: `{"title","content"}`; 201 + stored note, 400 on invalid input |
//! | `DELETE` | `/api/notes/:id` | 204 even if nothing was deleted; 404 `Invalid ID` if `:id` is not an integer |

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use notes_core::{ValidationError, note::Note, routes::CREATE_NOTE, store::NoteStore};
use serde_json::Value;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/notes`
///
/// Rows come from the only writer-validated path, so they are passed through
/// without re-validation.
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Note>>, ApiError>
where
  S: NoteStore,
{
  let notes = store.get_notes().await.map_err(ApiError::store)?;
  Ok(Json(notes))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/notes` — returns 201 + the stored [`Note`].
///
/// The body is read raw so that malformed JSON is reported through the same
/// `{ "message": ... }` 400 as a failed field check. An empty body is treated
/// as `{}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: NoteStore,
{
  let value: Value = if body.is_empty() {
    Value::Object(Default::default())
  } else {
    serde_json::from_slice(&body)
      .map_err(|e| ValidationError::new(format!("Invalid JSON body: {e}")))?
  };
  let input = CREATE_NOTE.parse_input(&value)?;

  let note = store.create_note(input).await.map_err(ApiError::store)?;
  tracing::debug!(id = note.id, "created note");
  Ok((StatusCode::CREATED, Json(note)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/notes/:id`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: NoteStore,
{
  let id: i64 = raw_id.parse().map_err(|_| ApiError::InvalidId)?;
  store.delete_note(id).await.map_err(ApiError::store)?;
  tracing::debug!(id, "deleted note");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Fallback ─────────────────────────────────────────────────────────────────

/// Any path outside the route table.
pub async fn not_found() -> ApiError { ApiError::NotFound }
