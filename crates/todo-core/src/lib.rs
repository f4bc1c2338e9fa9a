//! todo-core - Core library for todo-notes
//!
//! This crate contains the note model, the REST adapter for the remote notes
//! resource, and the editing state machine that keeps the visible table in
//! step with server state. The terminal client builds on top of it.

pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;
pub mod page;
pub mod table;
pub mod util;

pub use error::{Error, Result, TransportError};
pub use models::{Note, NoteField, NoteId};
