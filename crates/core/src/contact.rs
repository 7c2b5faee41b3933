//! Contact records and partial updates
//!
//! ## Wire Format
//!
//! A contact is a flat JSON object:
//! ```json
//! {
//!   "objectID": "abc",
//!   "createdAt": 1700000000000,
//!   "first": "Ada",
//!   "last": "Lovelace",
//!   "avatar": "https://example.com/ada.png",
//!   "twitter": "@ada",
//!   "notes": "First programmer",
//!   "favorite": true
//! }
//! ```
//!
//! Every member except `objectID` is optional. Members the model does not
//! know are kept verbatim in [`Contact::extra`].
//!
//! Decoding a stored record only requires a string `objectID`: a known
//! member of the wrong JSON type is kept verbatim in `extra` as well, so it
//! is written back unchanged. New payloads go through
//! [`Contact::from_payload`], which rejects such members.

use crate::error::{Error, Result};
use crate::types::{ContactId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Wire name of the identifier member
pub const ID_FIELD: &str = "objectID";

/// Wire name of the creation timestamp member
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Members with a typed field on [`Contact`], besides the identifier
pub const KNOWN_FIELDS: [&str; 7] = [
    CREATED_AT_FIELD,
    "first",
    "last",
    "avatar",
    "twitter",
    "notes",
    "favorite",
];

/// One stored contact
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier (`objectID`)
    #[serde(rename = "objectID")]
    pub object_id: ContactId,
    /// Creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Social handle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Favorite flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Members not covered by the fields above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Create an empty contact with only an identifier
    pub fn new(object_id: ContactId) -> Self {
        Self {
            object_id,
            created_at: None,
            first: None,
            last: None,
            avatar: None,
            twitter: None,
            notes: None,
            favorite: None,
            extra: Map::new(),
        }
    }

    /// Build a contact from a create payload
    ///
    /// The payload's members are taken as-is and `objectID` is forced to
    /// `object_id`, whatever the payload says.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if a known member has the wrong JSON type.
    pub fn from_payload(object_id: ContactId, mut payload: Map<String, Value>) -> Result<Self> {
        payload.insert(ID_FIELD.to_string(), Value::String(object_id.into_string()));
        let contact = Contact::from_stored(payload)?;
        match KNOWN_FIELDS.iter().find(|key| contact.extra.contains_key(**key)) {
            Some(key) => Err(Error::InvalidInput(format!(
                "malformed contact: `{}` has the wrong type",
                key
            ))),
            None => Ok(contact),
        }
    }

    /// Rebuild a contact from a stored record
    ///
    /// Known members that do not fit their field are moved to `extra`
    /// untouched; `null` clears the field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `objectID` is missing, blank or not
    /// a string.
    pub fn from_stored(mut record: Map<String, Value>) -> Result<Self> {
        let object_id = match record.remove(ID_FIELD) {
            Some(Value::String(id)) => ContactId::new(id)?,
            Some(other) => {
                return Err(Error::InvalidInput(format!(
                    "`{}` must be a string, got {}",
                    ID_FIELD, other
                )))
            }
            None => return Err(Error::InvalidInput(format!("missing `{}`", ID_FIELD))),
        };

        let mut contact = Contact::new(object_id);
        for (key, value) in record {
            let extra = &mut contact.extra;
            match key.as_str() {
                CREATED_AT_FIELD => lenient(&mut contact.created_at, extra, key, value),
                "first" => lenient(&mut contact.first, extra, key, value),
                "last" => lenient(&mut contact.last, extra, key, value),
                "avatar" => lenient(&mut contact.avatar, extra, key, value),
                "twitter" => lenient(&mut contact.twitter, extra, key, value),
                "notes" => lenient(&mut contact.notes, extra, key, value),
                "favorite" => lenient(&mut contact.favorite, extra, key, value),
                _ => {
                    extra.insert(key, value);
                }
            }
        }
        Ok(contact)
    }

    /// Display name: "first last", whichever parts exist
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first.as_deref(), self.last.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Whether the favorite flag is set
    pub fn is_favorite(&self) -> bool {
        self.favorite.unwrap_or(false)
    }

    /// Shallow-merge a patch onto this contact
    ///
    /// Members present in the patch overwrite; absent members are kept. The
    /// identifier never changes.
    pub fn apply(&mut self, patch: ContactPatch) {
        let extra = &mut self.extra;
        overwrite(&mut self.created_at, extra, CREATED_AT_FIELD, patch.created_at);
        overwrite(&mut self.first, extra, "first", patch.first);
        overwrite(&mut self.last, extra, "last", patch.last);
        overwrite(&mut self.avatar, extra, "avatar", patch.avatar);
        overwrite(&mut self.twitter, extra, "twitter", patch.twitter);
        overwrite(&mut self.notes, extra, "notes", patch.notes);
        overwrite(&mut self.favorite, extra, "favorite", patch.favorite);
        self.extra.extend(patch.extra);
    }
}

fn lenient<T: DeserializeOwned>(
    slot: &mut Option<T>,
    extra: &mut Map<String, Value>,
    key: String,
    value: Value,
) {
    if value.is_null() {
        *slot = None;
        return;
    }
    match T::deserialize(&value) {
        Ok(v) => *slot = Some(v),
        Err(_) => {
            extra.insert(key, value);
        }
    }
}

/// A patched member replaces any raw value kept under the same key
fn overwrite<T>(
    slot: &mut Option<T>,
    extra: &mut Map<String, Value>,
    key: &str,
    patched: Option<Option<T>>,
) {
    if let Some(v) = patched {
        *slot = v;
        extra.remove(key);
    }
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = Map::<String, Value>::deserialize(deserializer)?;
        Contact::from_stored(record).map_err(serde::de::Error::custom)
    }
}

/// User-editable fields of a new contact
///
/// This is what a front-end collects before the identifier and creation
/// time are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Social handle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Favorite flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ContactDraft {
    /// Render the draft as a create payload stamped with `created_at`
    pub fn into_payload(self, created_at: Timestamp) -> Map<String, Value> {
        let mut payload = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        payload.insert(
            CREATED_AT_FIELD.to_string(),
            Value::from(created_at.as_millis()),
        );
        payload
    }
}

/// A partial update
///
/// Each field is `None` when the member is absent from the patch,
/// `Some(None)` when it is present as `null`, and `Some(Some(v))` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ContactPatch {
    /// New creation time
    pub created_at: Option<Option<Timestamp>>,
    /// New first name
    pub first: Option<Option<String>>,
    /// New last name
    pub last: Option<Option<String>>,
    /// New avatar URL
    pub avatar: Option<Option<String>>,
    /// New social handle
    pub twitter: Option<Option<String>>,
    /// New notes
    pub notes: Option<Option<String>>,
    /// New favorite flag
    pub favorite: Option<Option<bool>>,
    /// Other members, copied onto the record verbatim
    pub extra: Map<String, Value>,
}

impl ContactPatch {
    /// An empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name
    pub fn first(mut self, value: impl Into<String>) -> Self {
        self.first = Some(Some(value.into()));
        self
    }

    /// Set the last name
    pub fn last(mut self, value: impl Into<String>) -> Self {
        self.last = Some(Some(value.into()));
        self
    }

    /// Set the avatar URL
    pub fn avatar(mut self, value: impl Into<String>) -> Self {
        self.avatar = Some(Some(value.into()));
        self
    }

    /// Set the social handle
    pub fn twitter(mut self, value: impl Into<String>) -> Self {
        self.twitter = Some(Some(value.into()));
        self
    }

    /// Set the notes
    pub fn notes(mut self, value: impl Into<String>) -> Self {
        self.notes = Some(Some(value.into()));
        self
    }

    /// Set the favorite flag
    pub fn favorite(mut self, value: bool) -> Self {
        self.favorite = Some(Some(value));
        self
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.created_at.is_none()
            && self.first.is_none()
            && self.last.is_none()
            && self.avatar.is_none()
            && self.twitter.is_none()
            && self.notes.is_none()
            && self.favorite.is_none()
            && self.extra.is_empty()
    }
}

fn nullable<T: DeserializeOwned>(key: &str, value: Value) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("malformed `{}`: {}", key, e)))
}

impl TryFrom<Map<String, Value>> for ContactPatch {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        let mut patch = ContactPatch::default();
        for (key, value) in map {
            match key.as_str() {
                ID_FIELD => {}
                CREATED_AT_FIELD => patch.created_at = Some(nullable(&key, value)?),
                "first" => patch.first = Some(nullable(&key, value)?),
                "last" => patch.last = Some(nullable(&key, value)?),
                "avatar" => patch.avatar = Some(nullable(&key, value)?),
                "twitter" => patch.twitter = Some(nullable(&key, value)?),
                "notes" => patch.notes = Some(nullable(&key, value)?),
                "favorite" => patch.favorite = Some(nullable(&key, value)?),
                _ => {
                    patch.extra.insert(key, value);
                }
            }
        }
        Ok(patch)
    }
}

fn put<T: Into<Value>>(map: &mut Map<String, Value>, key: &str, field: Option<Option<T>>) {
    if let Some(value) = field {
        map.insert(key.to_string(), value.map_or(Value::Null, Into::into));
    }
}

impl From<ContactPatch> for Map<String, Value> {
    fn from(patch: ContactPatch) -> Self {
        let mut map = patch.extra;
        put(
            &mut map,
            CREATED_AT_FIELD,
            patch.created_at.map(|ts| ts.map(|ts| ts.as_millis())),
        );
        put(&mut map, "first", patch.first);
        put(&mut map, "last", patch.last);
        put(&mut map, "avatar", patch.avatar);
        put(&mut map, "twitter", patch.twitter);
        put(&mut map, "notes", patch.notes);
        put(&mut map, "favorite", patch.favorite);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn ada() -> Contact {
        let payload = json!({
            "createdAt": 1_700_000_000_000i64,
            "first": "Ada",
            "last": "Byron",
            "twitter": "@ada",
            "favorite": false,
        });
        let Value::Object(map) = payload else { unreachable!() };
        Contact::from_payload(ContactId::new("abc").unwrap(), map).unwrap()
    }

    fn patch_from(value: Value) -> ContactPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_payload_forces_identifier() {
        let Value::Object(map) = json!({"objectID": "other", "first": "Ada"}) else {
            unreachable!()
        };
        let contact = Contact::from_payload(ContactId::new("abc").unwrap(), map).unwrap();
        assert_eq!(contact.object_id.as_str(), "abc");
        assert_eq!(contact.first.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_from_payload_rejects_wrong_types() {
        let Value::Object(map) = json!({"favorite": "yes"}) else { unreachable!() };
        let err = Contact::from_payload(ContactId::new("abc").unwrap(), map).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_unknown_members_are_kept() {
        let Value::Object(map) = json!({"first": "Ada", "id": "abc", "company": "AE"}) else {
            unreachable!()
        };
        let contact = Contact::from_payload(ContactId::new("abc").unwrap(), map).unwrap();
        assert_eq!(contact.extra.get("company"), Some(&json!("AE")));

        let wire = serde_json::to_value(&contact).unwrap();
        assert_eq!(wire["objectID"], "abc");
        assert_eq!(wire["id"], "abc");
        assert_eq!(wire["company"], "AE");
    }

    #[test]
    fn test_stored_record_keeps_mistyped_members() {
        let stored = json!({
            "objectID": "b",
            "first": "Grace",
            "favorite": "yes",
            "createdAt": "yesterday",
        });
        let contact: Contact = serde_json::from_value(stored.clone()).unwrap();

        assert_eq!(contact.first.as_deref(), Some("Grace"));
        assert_eq!(contact.favorite, None);
        assert_eq!(contact.extra.get("favorite"), Some(&json!("yes")));
        assert_eq!(serde_json::to_value(&contact).unwrap(), stored);
    }

    #[test]
    fn test_stored_record_needs_string_identifier() {
        for record in [json!({"first": "Ada"}), json!({"objectID": 7}), json!({"objectID": " "})] {
            let Value::Object(map) = record else { unreachable!() };
            assert!(Contact::from_stored(map).unwrap_err().is_invalid_input());
        }
        assert!(serde_json::from_value::<Contact>(json!({"objectID": 7})).is_err());
    }

    #[test]
    fn test_patch_replaces_mistyped_member() {
        let mut contact: Contact =
            serde_json::from_value(json!({"objectID": "b", "favorite": "yes"})).unwrap();
        contact.apply(ContactPatch::new().favorite(true));

        assert!(contact.is_favorite());
        assert!(contact.extra.is_empty());
        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            json!({"objectID": "b", "favorite": true})
        );
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let contact = Contact::new(ContactId::new("x").unwrap());
        assert_eq!(serde_json::to_value(&contact).unwrap(), json!({"objectID": "x"}));
    }

    #[test]
    fn test_favorite_patch_changes_only_favorite() {
        let mut contact = ada();
        let before = contact.clone();
        contact.apply(patch_from(json!({"favorite": true})));

        assert_eq!(contact.favorite, Some(true));
        assert_eq!(contact.first, before.first);
        assert_eq!(contact.last, before.last);
        assert_eq!(contact.twitter, before.twitter);
        assert_eq!(contact.created_at, before.created_at);
        assert_eq!(contact.extra, before.extra);
    }

    #[test]
    fn test_patch_null_clears_field() {
        let mut contact = ada();
        contact.apply(patch_from(json!({"twitter": null})));
        assert_eq!(contact.twitter, None);
        assert_eq!(contact.first.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_patch_cannot_change_identifier() {
        let mut contact = ada();
        let patch = patch_from(json!({"objectID": "hijack", "last": "Lovelace"}));
        contact.apply(patch);
        assert_eq!(contact.object_id.as_str(), "abc");
        assert_eq!(contact.last.as_deref(), Some("Lovelace"));
    }

    #[test]
    fn test_patch_rejects_wrong_types() {
        let result: std::result::Result<ContactPatch, _> =
            serde_json::from_value(json!({"first": 42}));
        assert!(result.is_err());
    }

    #[test]
    fn test_patch_wire_shape() {
        let patch = ContactPatch::new().last("Lovelace").favorite(true);
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"last": "Lovelace", "favorite": true})
        );

        let cleared = ContactPatch {
            notes: Some(None),
            ..ContactPatch::default()
        };
        assert_eq!(serde_json::to_value(&cleared).unwrap(), json!({"notes": null}));
    }

    #[test]
    fn test_draft_payload_carries_created_at() {
        let draft = ContactDraft {
            first: Some("Ada".into()),
            ..ContactDraft::default()
        };
        let payload = draft.into_payload(Timestamp::from_millis(42));
        assert_eq!(Value::Object(payload), json!({"first": "Ada", "createdAt": 42}));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(ada().full_name().as_deref(), Some("Ada Byron"));
        let mut only_last = Contact::new(ContactId::new("x").unwrap());
        only_last.last = Some("Hopper".into());
        assert_eq!(only_last.full_name().as_deref(), Some("Hopper"));
        assert_eq!(Contact::new(ContactId::new("y").unwrap()).full_name(), None);
    }

    fn opt_string() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z ]{0,12}")
    }

    proptest! {
        #[test]
        fn prop_empty_patch_is_identity(
            first in opt_string(),
            last in opt_string(),
            favorite in proptest::option::of(any::<bool>()),
        ) {
            let mut contact = Contact::new(ContactId::new("p").unwrap());
            contact.first = first;
            contact.last = last;
            contact.favorite = favorite;
            let before = contact.clone();
            contact.apply(ContactPatch::new());
            prop_assert_eq!(contact, before);
        }

        #[test]
        fn prop_patch_wire_round_trip_applies_identically(
            first in opt_string(),
            notes in opt_string(),
            favorite in any::<bool>(),
        ) {
            let mut patch = ContactPatch::new().favorite(favorite);
            patch.first = Some(first);
            patch.notes = Some(notes);

            let decoded: ContactPatch =
                serde_json::from_value(serde_json::to_value(&patch).unwrap()).unwrap();

            let mut a = ada();
            let mut b = ada();
            a.apply(patch);
            b.apply(decoded);
            prop_assert_eq!(a, b);
        }
    }
}
