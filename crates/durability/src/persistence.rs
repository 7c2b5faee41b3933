//! Mode-specific persistence sink
//!
//! The record store calls [`Persistence::persist`] with the complete
//! collection after every mutation, while it still holds its write lock.
//! Snapshots therefore arrive in mutation order.

use crate::error::Result;
use crate::mode::DurabilityMode;
use crate::store_file::StoreFile;
use crate::writer::{PersistenceWriter, WriterStats};
use rolodex_core::Contact;
use std::path::Path;

/// Where mutations go after they are applied in memory
pub enum Persistence {
    /// Nothing is written
    None,
    /// Snapshots go to a background writer
    Async(PersistenceWriter),
    /// Snapshots are written and fsynced before `persist` returns
    Strict(StoreFile),
}

impl Persistence {
    /// Build the sink for `mode`
    ///
    /// `file` is ignored for [`DurabilityMode::None`].
    pub fn new(mode: DurabilityMode, file: Option<StoreFile>) -> Result<Self> {
        match (mode, file) {
            (DurabilityMode::None, _) | (_, None) => Ok(Persistence::None),
            (DurabilityMode::Async, Some(file)) => {
                Ok(Persistence::Async(PersistenceWriter::spawn(file)?))
            }
            (DurabilityMode::Strict, Some(file)) => Ok(Persistence::Strict(file)),
        }
    }

    /// The effective mode
    pub fn mode(&self) -> DurabilityMode {
        match self {
            Persistence::None => DurabilityMode::None,
            Persistence::Async(_) => DurabilityMode::Async,
            Persistence::Strict(_) => DurabilityMode::Strict,
        }
    }

    /// Path of the store file, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Persistence::None => None,
            Persistence::Async(writer) => Some(writer.file().path()),
            Persistence::Strict(file) => Some(file.path()),
        }
    }

    /// Mirror `snapshot` to disk according to the mode
    ///
    /// Only [`Persistence::Strict`] can fail; async failures are logged by
    /// the writer thread.
    pub fn persist(&self, snapshot: &[Contact]) -> Result<()> {
        match self {
            Persistence::None => Ok(()),
            Persistence::Async(writer) => {
                writer.submit(snapshot.to_vec());
                Ok(())
            }
            Persistence::Strict(file) => file.write(snapshot, true),
        }
    }

    /// Wait for outstanding background writes
    pub fn flush(&self) {
        if let Persistence::Async(writer) = self {
            writer.flush();
        }
    }

    /// Flush and stop background work
    pub fn shutdown(&self) {
        if let Persistence::Async(writer) = self {
            writer.shutdown();
        }
    }

    /// Background writer counters (zero for other modes)
    pub fn stats(&self) -> WriterStats {
        match self {
            Persistence::Async(writer) => writer.stats(),
            _ => WriterStats::default(),
        }
    }
}
