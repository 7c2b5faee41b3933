//! Rolodex API Test Suite
//!
//! Exercises the embedded facade, restart durability, and the full stack
//! (HTTP server plus blocking client).
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test rolodex_api
//! cargo test --test rolodex_api durability::
//! ```

use rolodex::prelude::*;
use std::path::Path;

pub mod crud;
pub mod durability;
pub mod end_to_end;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Ephemeral store for tests that never touch disk
pub fn ephemeral() -> Rolodex {
    Rolodex::ephemeral().expect("Failed to create ephemeral store")
}

/// Store backed by `path` with the given durability
pub fn on_disk(path: &Path, mode: DurabilityMode) -> Rolodex {
    Rolodex::builder()
        .path(path)
        .durability(mode)
        .open()
        .expect("Failed to open store")
}

/// Draft with a first and last name
pub fn draft(first: &str, last: &str) -> ContactDraft {
    ContactDraft {
        first: Some(first.to_string()),
        last: Some(last.to_string()),
        ..ContactDraft::default()
    }
}
