//! Command dispatch

use std::sync::Arc;

use rolodex_engine::RecordStore;
use tracing::{debug, warn};

use crate::handlers;
use crate::{Command, Output, Result};

/// Dispatches [`Command`]s to their handlers
///
/// Cheap to clone; clones share the store.
#[derive(Clone)]
pub struct Executor {
    store: Arc<RecordStore>,
}

impl Executor {
    /// Create an executor over `store`
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Run one command
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        let mutation = cmd.is_mutation();

        let result = match cmd {
            Command::Create { id, payload } => handlers::contact::create(&self.store, id, payload),
            Command::List => Ok(handlers::contact::list(&self.store)),
            Command::Get { id } => handlers::contact::get(&self.store, id),
            Command::Update { id, payload } => handlers::contact::update(&self.store, id, payload),
            Command::Delete { id } => handlers::contact::delete(&self.store, id),
            Command::Ping => Ok(handlers::db::ping(&self.store)),
        };

        match &result {
            Ok(_) => debug!(command = name, "command executed"),
            Err(e) if mutation => warn!(command = name, error = %e, "command rejected"),
            Err(e) => debug!(command = name, error = %e, "command failed"),
        }
        result
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").field("store", &self.store).finish()
    }
}
