//! Error types for notewire.

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using notewire's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for notewire operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// The backend returned GraphQL errors
    #[error("Backend error: {0}")]
    Backend(String),

    /// Subscription stream failed or delivered an unreadable frame
    #[error("Subscription error: {0}")]
    Subscription(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
