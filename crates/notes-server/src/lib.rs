//! Server wiring for the notes service: configuration, store opening and the
//! top-level router.
//!
//! The binary in `main.rs` is a thin shell around these functions.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use notes_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered as defaults → TOML file → `NOTES_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:     String,
  pub port:     u16,
  /// SQLite database: a file path, `sqlite://<path>`, or `:memory:`.
  pub database: String,
}

/// Load [`ServerConfig`] from `path` (optional) and the environment.
pub fn load_config(path: impl Into<PathBuf>) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000)?
    .set_default("database", "notes.db")?
    .add_source(config::File::from(path.into()).required(false))
    .add_source(config::Environment::with_prefix("NOTES"))
    .build()?
    .try_deserialize()
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Open the store named by a `database` connection string.
pub async fn open_store(database: &str) -> notes_store_sqlite::Result<SqliteStore> {
  let location = database.strip_prefix("sqlite://").unwrap_or(database);
  if location == ":memory:" {
    return SqliteStore::open_in_memory().await;
  }
  SqliteStore::open(expand_tilde(Path::new(location))).await
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the notes API with request tracing.
pub fn app(store: Arc<SqliteStore>) -> Router {
  notes_api::api_router(store).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("notes-server-{}-{name}", std::process::id()))
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let cfg = load_config(temp_path("absent.toml")).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.database, "notes.db");
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = temp_path("config.toml");
    std::fs::write(&path, "port = 8080\ndatabase = \":memory:\"\n").unwrap();

    let cfg = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.database, ":memory:");
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/notes.db")), PathBuf::from(home).join("notes.db"));
    assert_eq!(expand_tilde(Path::new("/srv/notes.db")), PathBuf::from("/srv/notes.db"));
  }

  #[tokio::test]
  async fn app_serves_the_notes_api() {
    let store = open_store("sqlite://:memory:").await.unwrap();
    let resp = app(Arc::new(store))
      .oneshot(Request::get("/api/notes").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }
}
