//! Errors raised while reading or writing the store file

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for durability operations
pub type Result<T> = std::result::Result<T, Error>;

/// Durability errors
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON array of records
    #[error("malformed store file {}: {source}", .path.display())]
    Parse {
        /// Store file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded
    #[error("failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    /// The background writer could not be started
    #[error("persistence writer unavailable: {0}")]
    Writer(String),
}

impl Error {
    /// True when the store file simply does not exist yet
    pub fn is_missing_file(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<Error> for rolodex_core::Error {
    fn from(e: Error) -> Self {
        rolodex_core::Error::Storage(e.to_string())
    }
}
