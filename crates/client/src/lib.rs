//! Client data-access layer for the Rolodex HTTP API
//!
//! [`ContactsClient`] wraps the API's endpoints in blocking calls. Listings
//! come back sorted by last name and creation time; with a query they are
//! narrowed and ranked by [`matching::filter_contacts`].
//!
//! ```no_run
//! use rolodex_client::{ClientConfig, ContactsClient};
//!
//! let client = ContactsClient::new(ClientConfig::new("http://localhost:3001"));
//! for contact in client.list_contacts(Some("ada"))? {
//!     println!("{}", contact.object_id);
//! }
//! # Ok::<(), rolodex_client::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod matching;
pub mod sort;

pub use client::{ClientConfig, ContactsClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{Error, Result};
pub use matching::Ranking;
pub use rolodex_core::{Contact, ContactDraft, ContactId, ContactPatch};
