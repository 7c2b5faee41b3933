//! # Rolodex
//!
//! A contacts manager: an authoritative, insertion-ordered collection of
//! contact records mirrored to a single JSON file.
//!
//! The workspace is layered:
//!
//! - `rolodex-core` - the record model (`Contact`, `ContactPatch`, ...)
//! - `rolodex-durability` - the store file and the background writer
//! - `rolodex-engine` - the in-memory record store
//! - `rolodex-executor` - command validation, dispatch and response envelopes
//! - `rolodex-server` - the HTTP JSON API
//! - `rolodex-client` - a blocking client with sorting and fuzzy filtering
//!
//! This crate embeds the store directly, without HTTP.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rolodex::prelude::*;
//!
//! let book = Rolodex::open("data/data.json")?;
//! book.create("ada", json!({"first": "Ada", "last": "Lovelace"}))?;
//! for contact in book.list()? {
//!     println!("{}", contact.object_id);
//! }
//! book.close()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod database;
mod error;
mod types;

pub mod prelude;

pub use database::{Rolodex, RolodexBuilder};
pub use error::{Error, Result};

pub use types::*;
