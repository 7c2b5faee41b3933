//! Durability layer for Rolodex
//!
//! This crate mirrors the in-memory record collection to disk:
//! - StoreFile: one JSON array holding every record, rewritten atomically
//! - DurabilityMode: None, Async (default), Strict
//! - PersistenceWriter: background thread writing the newest snapshot
//! - Persistence: the mode-specific sink the record store writes through

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mode;
pub mod persistence;
pub mod store_file;
pub mod writer;

pub use error::{Error, Result};
pub use mode::DurabilityMode;
pub use persistence::Persistence;
pub use store_file::{LoadedRecords, StoreFile};
pub use writer::{PersistenceWriter, WriterStats};
