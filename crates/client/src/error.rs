//! Client errors

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a call to the API failed
#[derive(Debug, Error)]
pub enum Error {
    /// The server could not be reached, or the request timed out
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("server answered {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Raw response body
        body: String,
    },

    /// The response body was not the JSON we expected
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The response was JSON of the wrong shape
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// The configured base URL can not address the API
    #[error("invalid base URL {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Check if the server said 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Status { code: 404, .. })
    }

    /// The `error` member of a JSON error body, when there is one
    pub fn server_message(&self) -> Option<String> {
        match self {
            Error::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()?
                .get("error")?
                .as_str()
                .map(str::to_string),
            _ => None,
        }
    }
}
