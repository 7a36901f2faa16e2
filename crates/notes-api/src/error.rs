//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{ "message": "..." }`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use notes_core::{ValidationError, note::ErrorBody};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The creation payload failed validation.
  #[error("{0}")]
  Validation(#[from] ValidationError),

  /// The `:id` path segment is not an integer. Reported as 404, not 400.
  #[error("Invalid ID")]
  InvalidId,

  #[error("Not Found")]
  NotFound,

  /// The store failed. Not recovered; surfaces as a generic server error.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::InvalidId | ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let message = match self {
      ApiError::Store(_) => "Internal Server Error".to_owned(),
      other => other.to_string(),
    };
    (status, Json(ErrorBody { message })).into_response()
  }
}
