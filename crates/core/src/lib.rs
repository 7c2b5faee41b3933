//! Core types for Rolodex
//!
//! This crate defines the record model shared by every layer:
//! - [`ContactId`]: the unique, immutable identifier of a contact
//! - [`Timestamp`]: creation time in milliseconds since the Unix epoch
//! - [`Contact`]: one stored record
//! - [`ContactPatch`]: a partial update, applied as a shallow merge
//! - [`ContactDraft`]: the user-editable fields of a new contact
//! - [`Error`]: failures shared by the store and the request handlers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contact;
pub mod error;
pub mod types;

pub use contact::{Contact, ContactDraft, ContactPatch};
pub use error::{Error, Result};
pub use types::{ContactId, Timestamp};
