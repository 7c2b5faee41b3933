//! Command execution layer for Rolodex
//!
//! Every request against the record store is expressed as a [`Command`],
//! dispatched by the [`Executor`] to a handler, and answered with an
//! [`Output`] or an [`Error`]. Front-ends (the HTTP server, the facade) never
//! talk to the store directly.
//!
//! [`Envelope`] renders outputs and errors into the JSON bodies the HTTP API
//! returns, and [`Error::status`] picks the status code.
//!
//! ```ignore
//! use rolodex_executor::{Command, Executor, Output};
//! use serde_json::json;
//!
//! let executor = Executor::new(store);
//! let output = executor.execute(Command::Create {
//!     id: "abc".into(),
//!     payload: json!({"first": "Ada"}),
//! })?;
//! assert!(matches!(output, Output::Created(_)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod envelope;
mod error;
mod executor;
mod handlers;
mod output;


pub use command::Command;
pub use envelope::{Envelope, Items};
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;

pub use rolodex_core::{Contact, ContactDraft, ContactId, ContactPatch, Timestamp};
