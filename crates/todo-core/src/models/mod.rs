//! Data models for todo-notes

mod note;

pub use note::{Note, NoteField, NoteId};
