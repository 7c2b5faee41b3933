//! Unified error type for Rolodex.
//!
//! Wraps the errors of the internal crates behind one stable enum.

use thiserror::Error;

/// All Rolodex errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No contact has the identifier
    #[error("not found: {0}")]
    NotFound(String),

    /// The identifier is already taken
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing identifier, unusable payload, or a field of the wrong type
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The store file could not be written
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Rolodex operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a conflict error.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if the caller sent something unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// HTTP status the API would answer with.
    pub fn status(&self) -> u16 {
        match self {
            Error::InvalidInput(_) | Error::Conflict(_) => 400,
            Error::NotFound(_) => 404,
            _ => 500,
        }
    }
}

impl From<rolodex_executor::Error> for Error {
    fn from(e: rolodex_executor::Error) -> Self {
        use rolodex_executor::Error as ExecError;
        match e {
            ExecError::InvalidInput { reason } => Error::InvalidInput(reason),
            ExecError::Conflict { id } => Error::Conflict(id),
            ExecError::NotFound { id } => Error::NotFound(id),
            ExecError::Storage { reason } => Error::Storage(reason),
            ExecError::Internal { reason } => Error::Internal(reason),
        }
    }
}

impl From<rolodex_core::Error> for Error {
    fn from(e: rolodex_core::Error) -> Self {
        use rolodex_core::Error as CoreError;
        match e {
            CoreError::NotFound(id) => Error::NotFound(id.into_string()),
            CoreError::Conflict(id) => Error::Conflict(id.into_string()),
            CoreError::InvalidInput(msg) => Error::InvalidInput(msg),
            CoreError::Storage(msg) => Error::Storage(msg),
            CoreError::Serialization(msg) => Error::Serialization(msg),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
