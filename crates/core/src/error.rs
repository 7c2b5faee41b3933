//! Error types shared by the record store and its callers

use crate::types::ContactId;
use thiserror::Error;

/// Result type alias using the core [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by record operations
#[derive(Debug, Error)]
pub enum Error {
    /// No record carries the identifier
    #[error("contact not found: {0}")]
    NotFound(ContactId),

    /// A record with the identifier already exists
    #[error("contact already exists: {0}")]
    Conflict(ContactId),

    /// Missing identifier, missing payload, or a field of the wrong type
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store file could not be written (strict durability only)
    #[error("storage error: {0}")]
    Storage(String),

    /// A record could not be converted to or from JSON
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a duplicate-identifier error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if the caller sent something unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
