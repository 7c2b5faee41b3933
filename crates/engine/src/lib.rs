//! Record store for Rolodex
//!
//! [`RecordStore`] owns the authoritative, insertion-ordered collection of
//! contacts. It is loaded once from the store file when opened and, after
//! every mutation, hands a snapshot of the whole collection to the
//! persistence layer selected by its [`DurabilityMode`].
//!
//! ```ignore
//! use rolodex_engine::RecordStore;
//!
//! // In-memory only (tests)
//! let store = RecordStore::ephemeral()?;
//!
//! // Background persistence to data/data.json (default)
//! let store = RecordStore::open("data/data.json")?;
//!
//! // Synchronous, fsynced persistence
//! let store = RecordStore::builder()
//!     .path("data/data.json")
//!     .strict()
//!     .open()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod store;

pub use builder::StoreBuilder;
pub use rolodex_durability::{DurabilityMode, WriterStats};
pub use store::RecordStore;
