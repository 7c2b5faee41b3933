//! Successful command results

use rolodex_core::Contact;
use serde::{Deserialize, Serialize};

/// What a command produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// The stored record after a create
    Created(Contact),
    /// The full listing
    Contacts(Vec<Contact>),
    /// A single record
    Contact(Contact),
    /// The merged record after an update
    Updated(Contact),
    /// The record that was removed
    Deleted(Contact),
    /// Liveness answer
    Pong {
        /// Crate version
        version: String,
        /// Number of stored records
        contacts: usize,
    },
}

impl Output {
    /// HTTP status for this output
    pub fn status(&self) -> u16 {
        match self {
            Output::Created(_) => 201,
            _ => 200,
        }
    }

    /// Confirmation text for mutations
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Output::Created(_) => Some("Data successfully added"),
            Output::Updated(_) => Some("Data successfully updated"),
            Output::Deleted(_) => Some("Data successfully deleted"),
            _ => None,
        }
    }
}
