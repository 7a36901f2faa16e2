//! JSON REST API for the notes service.
//!
//! Exposes an axum [`Router`] backed by any [`notes_core::store::NoteStore`].
//! Paths and methods come from [`notes_core::routes`], the same table the
//! client uses. TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = notes_api::api_router(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod notes;

use std::sync::Arc;

use axum::{
  Router,
  routing::{MethodFilter, on},
};
use notes_core::{
  routes::{CREATE_NOTE, DELETE_NOTE, LIST_NOTES, Method},
  store::NoteStore,
};

pub use error::ApiError;

/// Map a route-table method onto axum's filter.
fn method_filter(method: Method) -> MethodFilter {
  match method {
    Method::Get => MethodFilter::GET,
    Method::Post => MethodFilter::POST,
    Method::Delete => MethodFilter::DELETE,
  }
}

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested or merged into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: NoteStore + 'static,
{
  // `list` and `create` share one path, so they share one method router.
  Router::new()
    .route(
      &LIST_NOTES.axum_path(),
      on(method_filter(LIST_NOTES.method), notes::list::<S>)
        .on(method_filter(CREATE_NOTE.method), notes::create::<S>),
    )
    .route(
      &DELETE_NOTE.axum_path(),
      on(method_filter(DELETE_NOTE.method), notes::delete::<S>),
    )
    .fallback(notes::not_found)
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
