//! Error types for todo-core

use thiserror::Error;

/// Result type alias using todo-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a call to the remote notes resource.
///
/// Non-success statuses and network failures collapse into this one kind.
/// The message is for display only; callers cannot branch on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Transport error: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that can occur in todo-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote resource call failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
