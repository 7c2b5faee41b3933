//! Public types for the Rolodex API.
//!
//! Re-exported from the internal crates.

// Record model
pub use rolodex_core::{Contact, ContactDraft, ContactId, ContactPatch, Timestamp};

// Wire field names
pub use rolodex_core::contact::{CREATED_AT_FIELD, ID_FIELD};

// Persistence
pub use rolodex_engine::{DurabilityMode, WriterStats};

// Command layer
pub use rolodex_executor::{Command, Envelope, Output};
