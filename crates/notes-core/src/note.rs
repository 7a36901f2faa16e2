//! The `Note` entity and its creation input.
//!
//! A note is created once and deleted once; there is no update path. `id` and
//! `created_at` are always assigned by the store and never accepted from a
//! client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ValidationError;

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A persisted note, as stored and as sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  /// Insertion time. Nullable in the table, so rows written out-of-band may
  /// carry `null`.
  pub created_at: Option<DateTime<Utc>>,
}

impl Note {
  /// Full-entity validator: parse a JSON value into a trusted [`Note`].
  pub fn parse(value: &Value) -> Result<Self, ValidationError> {
    Self::deserialize(value).map_err(|e| ValidationError::new(e.to_string()))
  }

  /// Parse a JSON array of notes, failing on the first malformed entry.
  pub fn parse_list(value: &Value) -> Result<Vec<Self>, ValidationError> {
    let items = value
      .as_array()
      .ok_or_else(|| ValidationError::new("Expected an array of notes"))?;
    items.iter().map(Self::parse).collect()
  }
}

// ─── Creation input ──────────────────────────────────────────────────────────

/// The client-submitted subset of a [`Note`] accepted on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
  pub title:   String,
  pub content: String,
}

impl NewNote {
  pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      title:   title.into(),
      content: content.into(),
    }
  }

  /// Creation-input validator for an untrusted JSON payload.
  ///
  /// Checks `title` then `content`; the first failing rule is returned.
  /// Unknown fields (including `id` and `createdAt`) are ignored.
  pub fn parse(value: &Value) -> Result<Self, ValidationError> {
    let obj = value
      .as_object()
      .ok_or_else(|| ValidationError::new(format!("Expected object, received {}", kind(value))))?;

    Ok(Self {
      title:   required_text(obj, "title")?,
      content: required_text(obj, "content")?,
    })
  }
}

fn required_text(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
  match obj.get(field) {
    None | Some(Value::Null) => Err(ValidationError::new(format!("{field} is required"))),
    Some(Value::String(s)) => {
      non_empty(field, s)?;
      Ok(s.clone())
    }
    Some(other) => Err(ValidationError::new(format!(
      "{field}: expected string, received {}",
      kind(other)
    ))),
  }
}

fn non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
  if value.is_empty() {
    return Err(ValidationError::new(format!("{field} must not be empty")));
  }
  Ok(())
}

fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

// ─── Error payload ───────────────────────────────────────────────────────────

/// Body of every non-success JSON response: `{ "message": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
  pub message: String,
}

impl ErrorBody {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn new_note_accepts_title_and_content() {
    let input = NewNote::parse(&json!({ "title": "A", "content": "B" })).unwrap();
    assert_eq!(input, NewNote::new("A", "B"));
  }

  #[test]
  fn new_note_ignores_client_supplied_id_and_timestamp() {
    let input = NewNote::parse(&json!({
      "id": 99,
      "createdAt": "2020-01-01T00:00:00Z",
      "title": "A",
      "content": "B",
    }))
    .unwrap();
    assert_eq!(input, NewNote::new("A", "B"));
  }

  #[test]
  fn missing_title_is_reported_first() {
    let err = NewNote::parse(&json!({})).unwrap_err();
    assert_eq!(err.message, "title is required");
  }

  #[test]
  fn missing_content_is_reported() {
    let err = NewNote::parse(&json!({ "title": "A" })).unwrap_err();
    assert_eq!(err.message, "content is required");
  }

  #[test]
  fn wrong_type_names_the_received_kind() {
    let err = NewNote::parse(&json!({ "title": 7, "content": "B" })).unwrap_err();
    assert_eq!(err.message, "title: expected string, received number");
  }

  #[test]
  fn empty_strings_are_rejected() {
    let err = NewNote::parse(&json!({ "title": "A", "content": "" })).unwrap_err();
    assert_eq!(err.message, "content must not be empty");
  }

  #[test]
  fn non_object_payload_is_rejected() {
    let err = NewNote::parse(&json!(["A", "B"])).unwrap_err();
    assert_eq!(err.message, "Expected object, received array");
  }

  #[test]
  fn note_uses_camel_case_and_allows_null_timestamp() {
    let note = Note::parse(&json!({
      "id": 1,
      "title": "A",
      "content": "B",
      "createdAt": null,
    }))
    .unwrap();
    assert_eq!(note.created_at, None);

    let wire = serde_json::to_value(&note).unwrap();
    assert!(wire.get("createdAt").is_some());
    assert!(wire.get("created_at").is_none());
  }

  #[test]
  fn note_list_rejects_malformed_entry() {
    let err = Note::parse_list(&json!([
      { "id": 1, "title": "A", "content": "B", "createdAt": null },
      { "id": "two", "title": "A", "content": "B", "createdAt": null },
    ]))
    .unwrap_err();
    assert!(!err.message.is_empty());
  }
}
