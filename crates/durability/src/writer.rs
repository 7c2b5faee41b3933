//! Background persistence writer
//!
//! One thread owns all writes to the store file. Producers hand it complete
//! snapshots of the collection; a snapshot that has not been picked up yet
//! is replaced by the next one, so at most one write is in flight, writes
//! never interleave, and the file ends up holding the latest snapshot.
//!
//! Write failures are logged and counted. They are never retried and never
//! reported to the producer.

use crate::error::{Error, Result};
use crate::store_file::StoreFile;
use parking_lot::{Condvar, Mutex};
use rolodex_core::Contact;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error};

/// Counters describing what the writer has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Snapshots handed to the writer
    pub submitted: u64,
    /// Snapshots actually written (coalesced ones are not counted)
    pub written: u64,
    /// Writes that failed
    pub failed: u64,
}

impl WriterStats {
    /// Snapshots that were replaced by a newer one before being written
    pub fn coalesced(&self) -> u64 {
        self.submitted.saturating_sub(self.written + self.failed)
    }
}

#[derive(Default)]
struct WriterState {
    pending: Option<Vec<Contact>>,
    /// Sequence number of the newest submitted snapshot
    submitted_seq: u64,
    /// Sequence number of the newest snapshot whose write has finished
    completed_seq: u64,
    stats: WriterStats,
    shutdown: bool,
    running: bool,
}

struct Shared {
    file: StoreFile,
    state: Mutex<WriterState>,
    changed: Condvar,
}

/// Serialized, latest-wins writer for a [`StoreFile`]
pub struct PersistenceWriter {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PersistenceWriter {
    /// Start the writer thread for `file`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Writer`] if the thread cannot be spawned.
    pub fn spawn(file: StoreFile) -> Result<Self> {
        let shared = Arc::new(Shared {
            file,
            state: Mutex::new(WriterState {
                running: true,
                ..WriterState::default()
            }),
            changed: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("rolodex-persist".into())
            .spawn(move || run(worker))
            .map_err(|e| Error::Writer(e.to_string()))?;

        Ok(Self {
            shared,
            handle: Mutex::new(Some(handle)),
        })
    }

    /// Store file this writer targets
    pub fn file(&self) -> &StoreFile {
        &self.shared.file
    }

    /// Queue a snapshot; returns immediately
    ///
    /// Replaces any snapshot still waiting to be written.
    pub fn submit(&self, snapshot: Vec<Contact>) {
        let mut state = self.shared.state.lock();
        if !state.running {
            error!(
                path = %self.shared.file.path().display(),
                "persistence writer stopped; snapshot dropped"
            );
            return;
        }
        state.pending = Some(snapshot);
        state.submitted_seq += 1;
        state.stats.submitted += 1;
        self.shared.changed.notify_all();
    }

    /// Block until every snapshot submitted so far has been written or has failed
    pub fn flush(&self) {
        let mut state = self.shared.state.lock();
        let target = state.submitted_seq;
        while state.running && state.completed_seq < target {
            self.shared.changed.wait(&mut state);
        }
    }

    /// Current counters
    pub fn stats(&self) -> WriterStats {
        self.shared.state.lock().stats
    }

    /// Flush, then stop and join the writer thread
    ///
    /// Idempotent. Snapshots submitted afterwards are dropped with an error log.
    pub fn shutdown(&self) {
        self.flush();
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
            self.shared.changed.notify_all();
        }
        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                error!("persistence writer thread panicked");
            }
        }
    }
}

impl Drop for PersistenceWriter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run(shared: Arc<Shared>) {
    let mut state = shared.state.lock();
    loop {
        if let Some(snapshot) = state.pending.take() {
            let seq = state.submitted_seq;
            drop(state);

            let outcome = shared.file.write(&snapshot, false);

            state = shared.state.lock();
            match outcome {
                Ok(()) => {
                    state.stats.written += 1;
                    debug!(
                        path = %shared.file.path().display(),
                        records = snapshot.len(),
                        "store file written"
                    );
                }
                Err(e) => {
                    state.stats.failed += 1;
                    error!(
                        path = %shared.file.path().display(),
                        error = %e,
                        "error writing store file; in-memory state kept"
                    );
                }
            }
            state.completed_seq = seq;
            shared.changed.notify_all();
            continue;
        }

        if state.shutdown {
            state.running = false;
            shared.changed.notify_all();
            return;
        }
        shared.changed.wait(&mut state);
    }
}
