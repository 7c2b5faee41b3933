//! Convenient imports for Rolodex.
//!
//! ```ignore
//! use rolodex::prelude::*;
//!
//! let book = Rolodex::ephemeral()?;
//! book.create("ada", json!({"first": "Ada"}))?;
//! ```

// Main entry point
pub use crate::database::{Rolodex, RolodexBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{Contact, ContactDraft, ContactId, ContactPatch, DurabilityMode, Timestamp};

// Re-export serde_json for convenience
pub use serde_json::json;
