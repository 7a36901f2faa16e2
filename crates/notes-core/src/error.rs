//! Error types for `notes-core`.

use thiserror::Error;

/// A creation payload (or an entity read back from the wire) failed its
/// shape or required-field checks.
///
/// `message` is human-readable and is what the server puts in the
/// `{ "message": ... }` body of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub message: String,
}

impl ValidationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("missing path parameter: {0}")]
  MissingParam(String),

  #[error("{route} returned undeclared status {status}")]
  UnexpectedStatus { route: &'static str, status: u16 },

  #[error("{route} returned a non-empty body for an empty response")]
  UnexpectedBody { route: &'static str },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
