//! Shared contract for the notes service.
//!
//! Both the HTTP server and the client link this crate, so the entity shape,
//! the creation-input rules and the route table exist exactly once.
//!
//! This crate is deliberately free of HTTP and database dependencies.

pub mod error;
pub mod note;
pub mod routes;
pub mod store;

pub use error::{Error, Result, ValidationError};
