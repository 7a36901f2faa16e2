//! The route table shared by server and client.
//!
//! | Name     | Method   | Path             | Input     | Responses                 |
//! |----------|----------|------------------|-----------|---------------------------|
//! | `list`   | `GET`    | `/api/notes`     | —         | 200 `[Note]`              |
//! | `create` | `POST`   | `/api/notes`     | `NewNote` | 201 `Note`, 400 `{message}` |
//! | `delete` | `DELETE` | `/api/notes/:id` | path `id` | 204 empty, 404 `{message}`  |
//!
//! The server registers exactly these paths and methods; the client builds
//! its URLs and decodes its responses from the same constants.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
  Error, Result, ValidationError,
  note::{ErrorBody, NewNote, Note},
};

// ─── Method ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
  Get,
  Post,
  Delete,
}

impl Method {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ─── Shapes ──────────────────────────────────────────────────────────────────

/// The body shape a request or response must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
  /// No body at all.
  Empty,
  Note,
  NoteList,
  NewNote,
  /// `{ "message": string }`
  Error,
}

impl Shape {
  /// Validate a raw body against this shape.
  pub fn check(self, body: &[u8]) -> Result<()> {
    match self {
      Self::Empty if body.is_empty() => Ok(()),
      Self::Empty => Err(ValidationError::new("expected an empty body").into()),
      Self::Note => Ok(Note::parse(&json(body)?).map(drop)?),
      Self::NoteList => Ok(Note::parse_list(&json(body)?).map(drop)?),
      Self::NewNote => Ok(NewNote::parse(&json(body)?).map(drop)?),
      Self::Error => Ok(serde_json::from_slice::<ErrorBody>(body).map(drop)?),
    }
  }
}

fn json(body: &[u8]) -> Result<Value> { Ok(serde_json::from_slice(body)?) }

// ─── Route ───────────────────────────────────────────────────────────────────

/// One logical operation: method, path template, and the shapes it accepts
/// and returns. The first entry of `responses` is the success status.
#[derive(Debug, Clone, Copy)]
pub struct Route {
  pub name:      &'static str,
  pub method:    Method,
  /// Path template; `:name` segments are placeholders.
  pub path:      &'static str,
  pub input:     Option<Shape>,
  pub responses: &'static [(u16, Shape)],
}

impl Route {
  pub fn success_status(&self) -> u16 {
    self.responses.first().map_or(200, |(status, _)| *status)
  }

  /// The declared shape for `status`, if the route declares one.
  pub fn response_shape(&self, status: u16) -> Option<Shape> {
    self
      .responses
      .iter()
      .find(|(s, _)| *s == status)
      .map(|(_, shape)| *shape)
  }

  /// Resolve this route's path template with `params`.
  pub fn url(&self, params: &[(&str, &str)]) -> Result<String> { build_url(self.path, params) }

  /// The path template with `{name}` placeholders, as axum expects.
  pub fn axum_path(&self) -> String {
    self
      .path
      .split('/')
      .map(|segment| match segment.strip_prefix(':') {
        Some(name) => format!("{{{name}}}"),
        None => segment.to_owned(),
      })
      .collect::<Vec<_>>()
      .join("/")
  }

  /// Validate an untrusted request body against this route's declared input.
  ///
  /// Server and client both go through here, so the table's `input` is the
  /// one place the creation rules are attached to an operation.
  pub fn parse_input(&self, value: &Value) -> Result<NewNote, ValidationError> {
    match self.input {
      Some(Shape::NewNote) => NewNote::parse(value),
      _ => Err(ValidationError::new(format!("{} takes no request body", self.name))),
    }
  }

  /// Decode the `{ "message" }` body of a declared failure status.
  pub fn decode_error(&self, status: u16, body: &[u8]) -> Result<ErrorBody> {
    match self.response_shape(status) {
      Some(Shape::Error) => Ok(serde_json::from_slice(body)?),
      _ => Err(Error::UnexpectedStatus {
        route: self.name,
        status,
      }),
    }
  }

  /// Check that `status` is this route's success status, validate `body`
  /// against the declared shape, and decode it.
  ///
  /// An empty body decodes as JSON `null`, so `T = ()` works for routes whose
  /// success response has no content.
  pub fn decode<T: DeserializeOwned>(&self, status: u16, body: &[u8]) -> Result<T> {
    let unexpected = Error::UnexpectedStatus {
      route: self.name,
      status,
    };
    if status != self.success_status() {
      return Err(unexpected);
    }
    let shape = self.response_shape(status).ok_or(unexpected)?;
    if shape == Shape::Empty && !body.is_empty() {
      return Err(Error::UnexpectedBody { route: self.name });
    }
    shape.check(body)?;

    if body.is_empty() {
      Ok(serde_json::from_value(Value::Null)?)
    } else {
      Ok(serde_json::from_slice(body)?)
    }
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

pub const LIST_NOTES: Route = Route {
  name:      "list",
  method:    Method::Get,
  path:      "/api/notes",
  input:     None,
  responses: &[(200, Shape::NoteList)],
};

pub const CREATE_NOTE: Route = Route {
  name:      "create",
  method:    Method::Post,
  path:      "/api/notes",
  input:     Some(Shape::NewNote),
  responses: &[(201, Shape::Note), (400, Shape::Error)],
};

pub const DELETE_NOTE: Route = Route {
  name:      "delete",
  method:    Method::Delete,
  path:      "/api/notes/:id",
  input:     None,
  responses: &[(204, Shape::Empty), (404, Shape::Error)],
};

pub const ROUTES: &[Route] = &[LIST_NOTES, CREATE_NOTE, DELETE_NOTE];

/// Substitute `:name` placeholders in `template`.
///
/// Every placeholder must have a matching entry in `params`; extra entries are
/// ignored.
pub fn build_url(template: &str, params: &[(&str, &str)]) -> Result<String> {
  let segments = template
    .split('/')
    .map(|segment| match segment.strip_prefix(':') {
      Some(name) => params
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| (*value).to_owned())
        .ok_or_else(|| Error::MissingParam(name.to_owned())),
      None => Ok(segment.to_owned()),
    })
    .collect::<Result<Vec<_>>>()?;
  Ok(segments.join("/"))
}
