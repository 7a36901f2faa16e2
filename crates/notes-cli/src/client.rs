//! Async HTTP client wrapping the notes JSON API.
//!
//! Every call is driven by the shared route table: paths and methods come from
//! [`notes_core::routes`], and success bodies are re-validated against the
//! route's declared response shape before they are returned.
//!
//! The note list is cached under the list route's path. Mutations invalidate
//! that entry only after the server has confirmed success, and a list fetch
//! that was in flight across such an invalidation is returned but not cached.

use notes_core::{
  ValidationError,
  note::{NewNote, Note},
  routes::{CREATE_NOTE, DELETE_NOTE, LIST_NOTES, Method, Route},
};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::cache::QueryCache;

/// Cache key for the note list.
const NOTES_KEY: &str = LIST_NOTES.path;

// ─── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClientError {
  /// Rejected locally, before any request was sent.
  #[error("{0}")]
  Invalid(#[from] ValidationError),

  /// The server answered 400 to a create request.
  #[error("Validation failed: {message}")]
  ValidationFailed { message: String },

  /// Any other non-success status.
  #[error("{message} ({status})")]
  Http { message: &'static str, status: u16 },

  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// A success response whose body does not match the route table.
  #[error("unexpected response: {0}")]
  Contract(#[from] notes_core::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

// ─── Client ───────────────────────────────────────────────────────────────────

/// Connection settings for the notes API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the notes JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] and the cache are
/// `Arc`-based, so clones share one cache.
#[derive(Clone)]
pub struct NotesClient {
  client: Client,
  config: ApiConfig,
  cache:  QueryCache,
}

impl NotesClient {
  /// No request timeout is set; calls rely on the transport's defaults.
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().build()?;
    Ok(Self {
      client,
      config,
      cache: QueryCache::new(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn request(&self, route: &Route, path: &str) -> reqwest::RequestBuilder {
    let method = match route.method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
      Method::Delete => reqwest::Method::DELETE,
    };
    self.client.request(method, self.url(path))
  }

  // ── List ──────────────────────────────────────────────────────────────────

  /// `GET /api/notes`, served from the cache when present.
  pub async fn list_notes(&self) -> Result<Vec<Note>> {
    if let Some(notes) = self.cache.get(NOTES_KEY).await {
      return Ok(notes);
    }
    let generation = self.cache.generation().await;
    let notes = self.fetch_notes().await?;
    self
      .cache
      .set_if_current(NOTES_KEY, notes.clone(), generation)
      .await;
    Ok(notes)
  }

  /// Drop the cached list and fetch it again.
  pub async fn refresh(&self) -> Result<Vec<Note>> {
    self.cache.invalidate(NOTES_KEY).await;
    self.list_notes().await
  }

  async fn fetch_notes(&self) -> Result<Vec<Note>> {
    let resp = self.request(&LIST_NOTES, LIST_NOTES.path).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Http {
        message: "Failed to fetch notes",
        status:  status.as_u16(),
      });
    }
    let body = resp.bytes().await?;
    Ok(LIST_NOTES.decode(status.as_u16(), &body)?)
  }

  // ── Create ────────────────────────────────────────────────────────────────

  /// `POST /api/notes`
  ///
  /// `input` is validated locally against the route's declared input first;
  /// nothing is sent if it fails.
  pub async fn create_note(&self, input: NewNote) -> Result<Note> {
    let payload = serde_json::to_value(&input).map_err(notes_core::Error::from)?;
    let input = CREATE_NOTE.parse_input(&payload)?;
    let note = self.send_create(&input).await?;
    self.cache.invalidate(NOTES_KEY).await;
    Ok(note)
  }

  async fn send_create(&self, input: &NewNote) -> Result<Note> {
    let resp = self
      .request(&CREATE_NOTE, CREATE_NOTE.path)
      .json(input)
      .send()
      .await?;
    let status = resp.status();

    if status == StatusCode::BAD_REQUEST {
      let body = resp.bytes().await?;
      let error = CREATE_NOTE.decode_error(status.as_u16(), &body)?;
      return Err(ClientError::ValidationFailed {
        message: error.message,
      });
    }
    if !status.is_success() {
      return Err(ClientError::Http {
        message: "Failed to create note",
        status:  status.as_u16(),
      });
    }

    let body = resp.bytes().await?;
    Ok(CREATE_NOTE.decode(status.as_u16(), &body)?)
  }

  // ── Delete ────────────────────────────────────────────────────────────────

  /// `DELETE /api/notes/:id`
  pub async fn delete_note(&self, id: i64) -> Result<()> {
    let id = id.to_string();
    let path = DELETE_NOTE.url(&[("id", &id)])?;

    let resp = self.request(&DELETE_NOTE, &path).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(ClientError::Http {
        message: "Failed to delete note",
        status:  status.as_u16(),
      });
    }
    let body = resp.bytes().await?;
    DELETE_NOTE.decode::<()>(status.as_u16(), &body)?;

    self.cache.invalidate(NOTES_KEY).await;
    Ok(())
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
