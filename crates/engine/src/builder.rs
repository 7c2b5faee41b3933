//! Builder for [`RecordStore`]

use crate::store::RecordStore;
use rolodex_core::Result;
use rolodex_durability::DurabilityMode;
use std::path::PathBuf;

/// Configures and opens a [`RecordStore`]
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    path: Option<PathBuf>,
    durability: DurabilityMode,
}

impl StoreBuilder {
    /// Defaults: no path, async durability
    pub fn new() -> Self {
        Self::default()
    }

    /// Store file location
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Shorthand for `durability(DurabilityMode::Strict)`
    pub fn strict(self) -> Self {
        self.durability(DurabilityMode::Strict)
    }

    /// Shorthand for `durability(DurabilityMode::None)`
    pub fn no_durability(self) -> Self {
        self.durability(DurabilityMode::None)
    }

    /// Configured store file location
    pub fn get_path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Configured durability mode
    pub fn get_durability(&self) -> DurabilityMode {
        self.durability
    }

    /// Load the store file (if any) and start persistence
    ///
    /// A missing or unreadable store file is logged and yields an empty
    /// store. Only failing to start the background writer is an error.
    pub fn open(self) -> Result<RecordStore> {
        RecordStore::from_builder(self)
    }
}
