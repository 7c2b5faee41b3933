//! Contact command handlers.
//!
//! Validation happens here, before the store is touched:
//! - new identifiers must be non-blank (a blank lookup id matches nothing)
//! - create payloads must be non-empty JSON objects
//! - update payloads must be JSON objects
//! - known members must have the right JSON type

use rolodex_core::contact::CREATED_AT_FIELD;
use rolodex_core::{Contact, ContactId, ContactPatch, Timestamp};
use rolodex_engine::RecordStore;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{Error, Output, Result};

// =============================================================================
// Validation
// =============================================================================

fn parse_id(raw: String) -> Result<ContactId> {
    ContactId::new(raw).map_err(Error::from)
}

/// Identifier for get/update/delete; a blank one can never be stored
fn lookup_id(raw: String) -> Result<ContactId> {
    ContactId::new(raw.clone()).map_err(|_| Error::NotFound { id: raw })
}

fn object_payload(payload: Value) -> Result<Map<String, Value>> {
    match payload {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidInput {
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle Create command.
pub fn create(store: &RecordStore, id: String, payload: Value) -> Result<Output> {
    let id = parse_id(id)?;
    let mut payload = object_payload(payload)?;
    if payload.is_empty() {
        return Err(Error::InvalidInput {
            reason: "payload must not be empty".into(),
        });
    }

    debug!(id = %id, payload = ?payload, "create");
    if !payload.contains_key(CREATED_AT_FIELD) {
        payload.insert(
            CREATED_AT_FIELD.to_string(),
            Value::from(Timestamp::now().as_millis()),
        );
    }

    let contact = Contact::from_payload(id, payload)?;
    let stored = store.insert(contact)?;
    Ok(Output::Created(stored))
}

/// Handle List command.
pub fn list(store: &RecordStore) -> Output {
    Output::Contacts(store.list_all())
}

/// Handle Get command.
pub fn get(store: &RecordStore, id: String) -> Result<Output> {
    let id = lookup_id(id)?;
    store
        .find_by_id(&id)
        .map(Output::Contact)
        .ok_or_else(|| Error::NotFound {
            id: id.into_string(),
        })
}

/// Handle Update command.
pub fn update(store: &RecordStore, id: String, payload: Value) -> Result<Output> {
    let id = lookup_id(id)?;
    let payload = object_payload(payload)?;

    debug!(id = %id, payload = ?payload, "update");
    let patch = ContactPatch::try_from(payload)?;
    let merged = store.update_by_id(&id, patch)?;
    Ok(Output::Updated(merged))
}

/// Handle Delete command.
pub fn delete(store: &RecordStore, id: String) -> Result<Output> {
    let id = lookup_id(id)?;
    let removed = store.delete_by_id(&id)?;
    Ok(Output::Deleted(removed))
}
