//! Per-client cache of query results, keyed by route path.
//!
//! Entries are only ever removed by [`QueryCache::invalidate`]; there is no
//! expiry. Each [`NotesClient`](crate::client::NotesClient) owns its own cache,
//! so separate clients never see each other's entries.
//!
//! Every invalidation bumps a generation counter. A fetch records the
//! generation before it starts and stores its result with
//! [`QueryCache::set_if_current`], so a fetch that overlapped a mutation
//! cannot write its now-stale result back.

use std::{collections::HashMap, sync::Arc};

use notes_core::note::Note;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
  entries:    HashMap<String, Vec<Note>>,
  generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct QueryCache {
  inner: Arc<RwLock<Inner>>,
}

impl QueryCache {
  pub fn new() -> Self { Self::default() }

  pub async fn get(&self, key: &str) -> Option<Vec<Note>> {
    self.inner.read().await.entries.get(key).cloned()
  }

  /// The current generation; read this before starting a fetch.
  pub async fn generation(&self) -> u64 { self.inner.read().await.generation }

  /// Store `notes` under `key` unless an invalidation happened since
  /// `generation` was read. Returns whether the entry was written.
  pub async fn set_if_current(&self, key: &str, notes: Vec<Note>, generation: u64) -> bool {
    let mut inner = self.inner.write().await;
    if inner.generation != generation {
      tracing::debug!(key, "discarded fetch that overlapped an invalidation");
      return false;
    }
    inner.entries.insert(key.to_owned(), notes);
    true
  }

  /// Drop the entry for `key` so the next read refetches.
  pub async fn invalidate(&self, key: &str) {
    let mut inner = self.inner.write().await;
    inner.generation += 1;
    if inner.entries.remove(key).is_some() {
      tracing::debug!(key, "invalidated cached query");
    }
  }

  #[cfg(test)]
  pub(crate) async fn contains(&self, key: &str) -> bool {
    self.inner.read().await.entries.contains_key(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn set_get_invalidate() {
    let cache = QueryCache::new();
    assert!(cache.get("/api/notes").await.is_none());

    let generation = cache.generation().await;
    assert!(cache.set_if_current("/api/notes", Vec::new(), generation).await);
    assert_eq!(cache.get("/api/notes").await, Some(Vec::new()));

    cache.invalidate("/api/notes").await;
    assert!(!cache.contains("/api/notes").await);
  }

  #[tokio::test]
  async fn write_after_invalidation_is_dropped() {
    let cache = QueryCache::new();
    let generation = cache.generation().await;

    // Nothing cached yet; the invalidation still counts.
    cache.invalidate("/api/notes").await;

    assert!(!cache.set_if_current("/api/notes", Vec::new(), generation).await);
    assert!(!cache.contains("/api/notes").await);
  }

  #[tokio::test]
  async fn clones_share_entries() {
    let cache = QueryCache::new();
    let other = cache.clone();
    cache.set_if_current("k", Vec::new(), 0).await;
    assert!(other.contains("k").await);
  }
}
