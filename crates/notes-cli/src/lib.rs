//! Client side of the notes service.
//!
//! [`client::NotesClient`] performs the list / create / delete calls against
//! the shared route table and keeps the note list in a [`cache::QueryCache`].

pub mod cache;
pub mod client;

pub use client::{ApiConfig, ClientError, NotesClient};
