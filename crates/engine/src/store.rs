//! RecordStore: the authoritative contact collection
//!
//! ## Design
//!
//! - The collection is a `Vec<Contact>` in insertion order behind a
//!   `parking_lot::RwLock`. Nothing outside this module can reach it.
//! - Lookups are linear scans with exact identifier equality.
//! - Every mutation persists the full collection while the write lock is
//!   held, so snapshots reach the persistence layer in mutation order.
//! - In strict mode a failed write undoes the mutation and returns
//!   [`Error::Storage`]. In async mode the writer logs failures and memory
//!   keeps the mutation, so memory and disk may diverge until the next
//!   successful write.

use crate::builder::StoreBuilder;
use parking_lot::RwLock;
use rolodex_core::{Contact, ContactId, ContactPatch, Error, Result};
use rolodex_durability::{DurabilityMode, Persistence, StoreFile, WriterStats};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// In-memory contact collection mirrored to the store file
pub struct RecordStore {
    records: RwLock<Vec<Contact>>,
    persistence: Persistence,
}

impl RecordStore {
    /// Open a store file with async durability
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// A store with no file at all
    pub fn ephemeral() -> Result<Self> {
        Self::builder().no_durability().open()
    }

    /// Start configuring a store
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    pub(crate) fn from_builder(builder: StoreBuilder) -> Result<Self> {
        let mode = builder.get_durability();
        let file = match builder.get_path() {
            Some(path) if mode.requires_file() => Some(StoreFile::new(path.clone())),
            _ => None,
        };

        let records = match &file {
            Some(file) => initialize(file),
            None => Vec::new(),
        };

        let persistence = Persistence::new(mode, file)?;
        Ok(Self {
            records: RwLock::new(records),
            persistence,
        })
    }

    /// Effective durability mode
    pub fn durability(&self) -> DurabilityMode {
        self.persistence.mode()
    }

    /// Store file path, if the store persists
    pub fn path(&self) -> Option<&Path> {
        self.persistence.path()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Whether a record with `id` exists
    pub fn contains(&self, id: &ContactId) -> bool {
        self.records.read().iter().any(|c| &c.object_id == id)
    }

    /// First record whose identifier equals `id`
    pub fn find_by_id(&self, id: &ContactId) -> Option<Contact> {
        self.records
            .read()
            .iter()
            .find(|c| &c.object_id == id)
            .cloned()
    }

    /// Every record in insertion order
    pub fn list_all(&self) -> Vec<Contact> {
        self.records.read().clone()
    }

    /// Append a record
    ///
    /// # Errors
    ///
    /// - [`Error::Conflict`] if the identifier is already taken
    /// - [`Error::Storage`] if a strict write fails (the record is not kept)
    pub fn insert(&self, contact: Contact) -> Result<Contact> {
        let mut records = self.records.write();
        if records.iter().any(|c| c.object_id == contact.object_id) {
            return Err(Error::Conflict(contact.object_id));
        }

        records.push(contact.clone());
        if let Err(e) = self.persistence.persist(&records) {
            records.pop();
            return Err(e.into());
        }

        debug!(id = %contact.object_id, total = records.len(), "contact inserted");
        Ok(contact)
    }

    /// Shallow-merge `patch` onto the record with `id`
    ///
    /// Returns the merged record.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no record has the identifier
    /// - [`Error::Storage`] if a strict write fails (the record is unchanged)
    pub fn update_by_id(&self, id: &ContactId, patch: ContactPatch) -> Result<Contact> {
        let mut records = self.records.write();
        let index = position(&records, id).ok_or_else(|| Error::NotFound(id.clone()))?;

        let previous = records[index].clone();
        records[index].apply(patch);
        if let Err(e) = self.persistence.persist(&records) {
            records[index] = previous;
            return Err(e.into());
        }

        debug!(id = %id, "contact updated");
        Ok(records[index].clone())
    }

    /// Remove the record with `id` and return it
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if no record has the identifier
    /// - [`Error::Storage`] if a strict write fails (the record is kept)
    pub fn delete_by_id(&self, id: &ContactId) -> Result<Contact> {
        let mut records = self.records.write();
        let index = position(&records, id).ok_or_else(|| Error::NotFound(id.clone()))?;

        let removed = records.remove(index);
        if let Err(e) = self.persistence.persist(&records) {
            records.insert(index, removed);
            return Err(e.into());
        }

        debug!(id = %id, total = records.len(), "contact deleted");
        Ok(removed)
    }

    /// Wait until pending background writes have finished
    pub fn flush(&self) {
        self.persistence.flush();
    }

    /// Flush and stop background persistence
    pub fn shutdown(&self) {
        self.persistence.shutdown();
    }

    /// Background writer counters
    pub fn writer_stats(&self) -> WriterStats {
        self.persistence.stats()
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.len())
            .field("durability", &self.durability())
            .field("path", &self.path())
            .finish()
    }
}

fn position(records: &[Contact], id: &ContactId) -> Option<usize> {
    records.iter().position(|c| &c.object_id == id)
}

/// Read the store file once; failures leave the collection empty
///
/// Nothing the file held is lost to the first rewrite: an unusable file is
/// moved to `<name>.corrupt`, and a file with dropped records is copied there.
fn initialize(file: &StoreFile) -> Vec<Contact> {
    if let Err(e) = file.ensure_parent_dir() {
        error!(error = %e, "error creating data directory");
    }

    let loaded = match file.load() {
        Ok(loaded) => loaded,
        Err(e) if e.is_missing_file() => {
            info!(path = %file.path().display(), "no store file yet; starting empty");
            return Vec::new();
        }
        Err(e) => {
            error!(error = %e, "error reading store file; starting empty");
            match file.quarantine() {
                Ok(moved) => warn!(path = %moved.display(), "unreadable store file moved aside"),
                Err(e) => error!(error = %e, "error moving unreadable store file aside"),
            }
            return Vec::new();
        }
    };

    for (index, reason) in &loaded.rejected {
        warn!(path = %file.path().display(), index, reason = %reason, "skipping unusable record");
    }

    let mut seen = HashSet::with_capacity(loaded.records.len());
    let total = loaded.records.len();
    let records: Vec<Contact> = loaded
        .records
        .into_iter()
        .filter(|c| seen.insert(c.object_id.clone()))
        .collect();
    if records.len() != total {
        warn!(
            path = %file.path().display(),
            dropped = total - records.len(),
            "store file holds duplicate identifiers; keeping the first of each"
        );
    }

    if !loaded.rejected.is_empty() || records.len() != total {
        match file.preserve_copy() {
            Ok(copy) => warn!(path = %copy.display(), "original store file preserved"),
            Err(e) => error!(error = %e, "error preserving original store file"),
        }
    }

    info!(path = %file.path().display(), records = records.len(), "store file loaded");
    records
}
