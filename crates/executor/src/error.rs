//! Executor errors and their HTTP meaning

use thiserror::Error;

/// Result type alias for executor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a command failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Missing identifier, unusable payload, or a field of the wrong type
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// The identifier is already taken
    #[error("contact already exists: {id}")]
    Conflict {
        /// Offending identifier
        id: String,
    },

    /// No contact has the identifier
    #[error("contact not found: {id}")]
    NotFound {
        /// Requested identifier
        id: String,
    },

    /// The store file could not be written
    #[error("storage error: {reason}")]
    Storage {
        /// Underlying failure
        reason: String,
    },

    /// A bug: something that should not happen did
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// HTTP status code
    ///
    /// A duplicate identifier is a bad request rather than 409, matching what
    /// existing front-ends expect.
    pub fn status(&self) -> u16 {
        match self {
            Error::InvalidInput { .. } | Error::Conflict { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::Storage { .. } | Error::Internal { .. } => 500,
        }
    }

    /// Text for the `{"error": ...}` body
    pub fn message(&self) -> &'static str {
        match self {
            Error::InvalidInput { .. } => "Invalid data format or missing ID",
            Error::Conflict { .. } => "Item with the same ID already exists",
            Error::NotFound { .. } => "Item not found",
            Error::Storage { .. } => "Failed to save data",
            Error::Internal { .. } => "Internal server error",
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<rolodex_core::Error> for Error {
    fn from(e: rolodex_core::Error) -> Self {
        use rolodex_core::Error as Core;
        match e {
            Core::NotFound(id) => Error::NotFound {
                id: id.into_string(),
            },
            Core::Conflict(id) => Error::Conflict {
                id: id.into_string(),
            },
            Core::InvalidInput(reason) => Error::InvalidInput { reason },
            Core::Storage(reason) => Error::Storage { reason },
            Core::Serialization(reason) => Error::Internal { reason },
        }
    }
}
