//! Commands accepted by the [`Executor`](crate::Executor)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single request against the record store
///
/// Identifiers and payloads arrive unvalidated, exactly as a front-end
/// received them; the handlers decide whether they are usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Store a new contact under `id`
    Create {
        /// Identifier from the request path
        id: String,
        /// Request body; must be a non-empty JSON object
        payload: Value,
    },
    /// Every contact in insertion order
    List,
    /// One contact
    Get {
        /// Identifier from the request path
        id: String,
    },
    /// Shallow-merge `payload` onto the contact with `id`
    Update {
        /// Identifier from the request path
        id: String,
        /// Request body; must be a JSON object
        payload: Value,
    },
    /// Remove the contact with `id`
    Delete {
        /// Identifier from the request path
        id: String,
    },
    /// Liveness check
    Ping,
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::List => "list",
            Command::Get { .. } => "get",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
            Command::Ping => "ping",
        }
    }

    /// Whether the command changes the store
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Create { .. } | Command::Update { .. } | Command::Delete { .. }
        )
    }
}
