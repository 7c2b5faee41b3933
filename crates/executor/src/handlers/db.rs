//! Store-level handlers.

use rolodex_engine::RecordStore;

use crate::Output;

/// Handle Ping command.
pub fn ping(store: &RecordStore) -> Output {
    Output::Pong {
        version: env!("CARGO_PKG_VERSION").to_string(),
        contacts: store.len(),
    }
}
