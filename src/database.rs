//! Main entry point for Rolodex.
//!
//! [`Rolodex`] wraps the record store and the command executor with typed
//! methods. Each method builds a [`Command`], runs it, and unwraps the
//! expected [`Output`].

use crate::error::{Error, Result};
use rolodex_core::{Contact, ContactDraft, ContactId, ContactPatch, Timestamp};
use rolodex_engine::{DurabilityMode, RecordStore, StoreBuilder, WriterStats};
use rolodex_executor::{Command, Executor, Output};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// An embedded contacts store.
///
/// # Example
///
/// ```ignore
/// use rolodex::prelude::*;
///
/// let book = Rolodex::open("data/data.json")?;
/// book.create("ada", json!({"first": "Ada", "last": "Lovelace"}))?;
/// book.update("ada", ContactPatch::new().favorite(true))?;
/// assert!(book.get("ada")?.unwrap().is_favorite());
/// book.close()?;
/// ```
pub struct Rolodex {
    store: Arc<RecordStore>,
    executor: Executor,
}

impl Rolodex {
    /// Open the store file at `path` with async durability.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create a store that never touches the disk.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().no_durability().open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> RolodexBuilder {
        RolodexBuilder::new()
    }

    fn from_store(store: RecordStore) -> Self {
        let store = Arc::new(store);
        Self {
            executor: Executor::new(Arc::clone(&store)),
            store,
        }
    }

    /// The executor, for callers that work with [`Command`]s directly.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // =========================================================================
    // Contact Operations
    // =========================================================================

    /// Store `payload` under `id`.
    ///
    /// `createdAt` is stamped when the payload lacks it.
    pub fn create(&self, id: &str, payload: Value) -> Result<Contact> {
        match self.executor.execute(Command::Create {
            id: id.to_string(),
            payload,
        })? {
            Output::Created(contact) => Ok(contact),
            _ => Err(Error::Internal("Unexpected output for Create".into())),
        }
    }

    /// Store a draft under a freshly generated identifier.
    pub fn add(&self, draft: ContactDraft) -> Result<Contact> {
        let id = ContactId::generate();
        let payload = Value::Object(draft.into_payload(Timestamp::now()));
        self.create(id.as_str(), payload)
    }

    /// Every contact in insertion order.
    pub fn list(&self) -> Result<Vec<Contact>> {
        match self.executor.execute(Command::List)? {
            Output::Contacts(contacts) => Ok(contacts),
            _ => Err(Error::Internal("Unexpected output for List".into())),
        }
    }

    /// One contact, or `None` if no contact has `id`.
    pub fn get(&self, id: &str) -> Result<Option<Contact>> {
        match self.executor.execute(Command::Get { id: id.to_string() }) {
            Ok(Output::Contact(contact)) => Ok(Some(contact)),
            Ok(_) => Err(Error::Internal("Unexpected output for Get".into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Shallow-merge `patch` onto the contact with `id`.
    pub fn update(&self, id: &str, patch: ContactPatch) -> Result<Contact> {
        match self.executor.execute(Command::Update {
            id: id.to_string(),
            payload: Value::Object(patch.into()),
        })? {
            Output::Updated(contact) => Ok(contact),
            _ => Err(Error::Internal("Unexpected output for Update".into())),
        }
    }

    /// Remove the contact with `id` and return it.
    pub fn delete(&self, id: &str) -> Result<Contact> {
        match self.executor.execute(Command::Delete { id: id.to_string() })? {
            Output::Deleted(contact) => Ok(contact),
            _ => Err(Error::Internal("Unexpected output for Delete".into())),
        }
    }

    // =========================================================================
    // Store Operations
    // =========================================================================

    /// Liveness check; returns the number of stored contacts.
    pub fn ping(&self) -> Result<usize> {
        match self.executor.execute(Command::Ping)? {
            Output::Pong { contacts, .. } => Ok(contacts),
            _ => Err(Error::Internal("Unexpected output for Ping".into())),
        }
    }

    /// Wait until pending background writes reach the store file.
    pub fn flush(&self) -> Result<()> {
        self.store.flush();
        Ok(())
    }

    /// Flush and stop background persistence.
    ///
    /// After `close()` mutations are no longer written to disk.
    pub fn close(&self) -> Result<()> {
        self.store.shutdown();
        info!("rolodex closed");
        Ok(())
    }

    /// Store file path, `None` for ephemeral stores.
    pub fn path(&self) -> Option<&Path> {
        self.store.path()
    }

    /// Get the current durability mode.
    pub fn durability_mode(&self) -> DurabilityMode {
        self.store.durability()
    }

    /// Background writer counters.
    pub fn writer_stats(&self) -> WriterStats {
        self.store.writer_stats()
    }
}

/// Builder for store configuration.
///
/// ```ignore
/// let book = Rolodex::builder()
///     .path("data/data.json")
///     .strict()
///     .open()?;
/// ```
#[derive(Debug, Default)]
pub struct RolodexBuilder {
    path: Option<PathBuf>,
    durability: Option<DurabilityMode>,
}

impl RolodexBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the store file path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the durability mode.
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = Some(mode);
        self
    }

    /// Write and fsync before every mutation returns.
    pub fn strict(self) -> Self {
        self.durability(DurabilityMode::Strict)
    }

    /// Never write the store file.
    pub fn no_durability(self) -> Self {
        self.durability(DurabilityMode::None)
    }

    /// Open the store.
    pub fn open(self) -> Result<Rolodex> {
        let mut builder = StoreBuilder::new();
        if let Some(path) = self.path {
            builder = builder.path(path);
        }
        if let Some(mode) = self.durability {
            builder = builder.durability(mode);
        }
        let store = builder.open().map_err(Error::from)?;
        Ok(Rolodex::from_store(store))
    }
}
