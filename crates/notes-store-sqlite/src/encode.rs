//! Encoding and decoding helpers between [`Note`] and its SQLite row.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed six-digit fraction,
//! so lexical order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use notes_core::note::Note;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// Column order used by every `SELECT` / `RETURNING` clause.
pub const NOTE_COLUMNS: &str = "id, title, content, created_at";

/// A `notes` row exactly as read from SQLite, before timestamp decoding.
pub struct RawNote {
  pub id:         i64,
  pub title:      String,
  pub content:    String,
  pub created_at: Option<String>,
}

impl RawNote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      title:      row.get(1)?,
      content:    row.get(2)?,
      created_at: row.get(3)?,
    })
  }

  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      id:         self.id,
      title:      self.title,
      content:    self.content,
      created_at: self.created_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn encoded_timestamps_are_fixed_width() {
    let whole = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let encoded = encode_dt(whole);
    assert_eq!(encoded, "2024-01-01T12:00:00.000000Z");
    assert_eq!(decode_dt(&encoded).unwrap(), whole);
  }

  #[test]
  fn decodes_sqlite_default_format() {
    let dt = decode_dt("2024-01-01T12:00:00.123Z").unwrap();
    assert_eq!(dt.timestamp_subsec_millis(), 123);
  }

  #[test]
  fn rejects_garbage() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
