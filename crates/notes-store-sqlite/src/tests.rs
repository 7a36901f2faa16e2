//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{SubsecRound as _, Utc};
use notes_core::{note::NewNote, store::NoteStore};

use crate::{
  SqliteStore,
  encode::{decode_dt, encode_dt},
};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Insert a row directly, bypassing the store, with a chosen timestamp.
async fn insert_raw(s: &SqliteStore, title: &str, created_at: Option<&str>) {
  let title = title.to_owned();
  let created_at = created_at.map(str::to_owned);
  s.conn
    .call(move |conn| {
      conn.execute(
        "INSERT INTO notes (title, content, created_at) VALUES (?1, 'body', ?2)",
        rusqlite::params![title, created_at],
      )?;
      Ok(())
    })
    .await
    .unwrap();
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_generated_fields() {
  let s = store().await;
  let before = Utc::now().trunc_subsecs(6);

  let note = s.create_note(NewNote::new("A", "B")).await.unwrap();
  assert!(note.id > 0);
  assert_eq!(note.title, "A");
  assert_eq!(note.content, "B");
  let created_at = note.created_at.expect("created_at assigned");
  assert!(created_at >= before, "{created_at} < {before}");
}

#[tokio::test]
async fn created_ids_are_distinct() {
  let s = store().await;
  let a = s.create_note(NewNote::new("a", "1")).await.unwrap();
  let b = s.create_note(NewNote::new("b", "2")).await.unwrap();
  let c = s.create_note(NewNote::new("c", "3")).await.unwrap();
  assert_ne!(a.id, b.id);
  assert_ne!(b.id, c.id);
  assert_ne!(a.id, c.id);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = s.create_note(NewNote::new("a", "1")).await.unwrap();
  s.delete_note(first.id).await.unwrap();
  let second = s.create_note(NewNote::new("b", "2")).await.unwrap();
  assert!(second.id > first.id);
}

#[tokio::test]
async fn column_default_fills_missing_timestamp() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute("INSERT INTO notes (title, content) VALUES ('t', 'c')", [])?;
      Ok(())
    })
    .await
    .unwrap();

  let notes = s.get_notes().await.unwrap();
  assert_eq!(notes.len(), 1);
  assert!(notes[0].created_at.is_some());
}

#[tokio::test]
async fn column_default_matches_store_timestamp_width() {
  let s = store().await;
  let raw: String = s
    .conn
    .call(|conn| {
      conn.execute("INSERT INTO notes (title, content) VALUES ('t', 'c')", [])?;
      Ok(conn.query_row(
        "SELECT created_at FROM notes WHERE id = last_insert_rowid()",
        [],
        |row| row.get(0),
      )?)
    })
    .await
    .unwrap();

  let reencoded = encode_dt(decode_dt(&raw).unwrap());
  assert_eq!(raw, reencoded);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_notes_on_empty_store() {
  let s = store().await;
  assert!(s.get_notes().await.unwrap().is_empty());
}

#[tokio::test]
async fn get_notes_is_newest_first() {
  let s = store().await;
  for title in ["first", "second", "third"] {
    s.create_note(NewNote::new(title, "x")).await.unwrap();
  }

  let notes = s.get_notes().await.unwrap();
  let titles: Vec<_> = notes.iter().map(|n| n.title.as_str()).collect();
  assert_eq!(titles, ["third", "second", "first"]);
  assert!(notes.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn equal_timestamps_fall_back_to_insertion_order() {
  let s = store().await;
  let ts = "2024-05-01T10:00:00.000000Z";
  insert_raw(&s, "older", Some(ts)).await;
  insert_raw(&s, "newer", Some(ts)).await;
  insert_raw(&s, "earliest", Some("2024-04-01T10:00:00.000000Z")).await;

  let titles: Vec<_> = s
    .get_notes()
    .await
    .unwrap()
    .into_iter()
    .map(|n| n.title)
    .collect();
  assert_eq!(titles, ["newer", "older", "earliest"]);
}

#[tokio::test]
async fn null_timestamps_sort_last() {
  let s = store().await;
  insert_raw(&s, "undated", None).await;
  s.create_note(NewNote::new("dated", "x")).await.unwrap();

  let notes = s.get_notes().await.unwrap();
  assert_eq!(notes[0].title, "dated");
  assert_eq!(notes[1].title, "undated");
  assert_eq!(notes[1].created_at, None);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_only_the_target() {
  let s = store().await;
  let keep_a = s.create_note(NewNote::new("a", "1")).await.unwrap();
  let gone = s.create_note(NewNote::new("b", "2")).await.unwrap();
  let keep_c = s.create_note(NewNote::new("c", "3")).await.unwrap();

  s.delete_note(gone.id).await.unwrap();

  let ids: Vec<_> = s.get_notes().await.unwrap().iter().map(|n| n.id).collect();
  assert_eq!(ids, [keep_c.id, keep_a.id]);
}

#[tokio::test]
async fn delete_missing_id_is_a_no_op() {
  let s = store().await;
  let note = s.create_note(NewNote::new("a", "1")).await.unwrap();

  s.delete_note(note.id + 1000).await.unwrap();
  s.delete_note(-1).await.unwrap();

  assert_eq!(s.get_notes().await.unwrap(), vec![note]);
}

#[tokio::test]
async fn delete_twice_succeeds() {
  let s = store().await;
  let note = s.create_note(NewNote::new("a", "1")).await.unwrap();
  s.delete_note(note.id).await.unwrap();
  s.delete_note(note.id).await.unwrap();
  assert!(s.get_notes().await.unwrap().is_empty());
}

// ─── Scenario ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_list_delete_list() {
  let s = store().await;

  let note = s.create_note(NewNote::new("A", "B")).await.unwrap();
  assert_eq!(note.id, 1);

  assert_eq!(s.get_notes().await.unwrap(), vec![note.clone()]);

  s.delete_note(note.id).await.unwrap();
  assert!(s.get_notes().await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_notes() {
  let path = std::env::temp_dir().join(format!(
    "notes-store-test-{}-{}.db",
    std::process::id(),
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_note(NewNote::new("kept", "on disk")).await.unwrap()
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.get_notes().await.unwrap(), vec![created]);

  drop(reopened);
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
  }
}
