//! JSON bodies returned by the HTTP API
//!
//! | Result | Body |
//! |---|---|
//! | create / update / delete | `{"message": "...", "data": {"items": [record]}}` |
//! | get one | `{"data": {"items": [record]}}` |
//! | list | `{"data": [record, ...]}` |
//! | ping | `{"status": "ok", "contacts": n, "version": "..."}` |
//! | any error | `{"error": "..."}` |

use crate::error::Error;
use crate::output::Output;
use rolodex_core::Contact;
use serde::{Deserialize, Serialize};

/// Wrapper around the records of a single-record response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Items {
    /// Always exactly one record
    pub items: Vec<Contact>,
}

/// A response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope {
    /// One record, optionally with a confirmation message
    Items {
        /// Confirmation text (mutations only)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// The record
        data: Items,
    },
    /// Every record
    Listing {
        /// The records in store order
        data: Vec<Contact>,
    },
    /// Health report
    Health {
        /// Always `"ok"`
        status: String,
        /// Number of stored records
        contacts: usize,
        /// Server version
        version: String,
    },
    /// Failure
    Error {
        /// Human-readable reason
        error: String,
    },
}

impl Envelope {
    /// Status code and body for a successful command
    pub fn from_output(output: Output) -> (u16, Envelope) {
        let status = output.status();
        let message = output.message().map(str::to_string);
        let body = match output {
            Output::Created(contact)
            | Output::Updated(contact)
            | Output::Deleted(contact)
            | Output::Contact(contact) => Envelope::Items {
                message,
                data: Items {
                    items: vec![contact],
                },
            },
            Output::Contacts(data) => Envelope::Listing { data },
            Output::Pong { version, contacts } => Envelope::Health {
                status: "ok".into(),
                contacts,
                version,
            },
        };
        (status, body)
    }

    /// Status code and body for a failed command
    pub fn from_error(error: &Error) -> (u16, Envelope) {
        (
            error.status(),
            Envelope::Error {
                error: error.message().to_string(),
            },
        )
    }

    /// The single record of an `Items` body
    pub fn into_record(self) -> Option<Contact> {
        match self {
            Envelope::Items { data, .. } => data.items.into_iter().next(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolodex_core::ContactId;
    use serde_json::json;

    fn ada() -> Contact {
        let mut c = Contact::new(ContactId::new("a").unwrap());
        c.first = Some("Ada".into());
        c
    }

    #[test]
    fn test_created_body() {
        let (status, body) = Envelope::from_output(Output::Created(ada()));
        assert_eq!(status, 201);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Data successfully added",
                "data": {"items": [{"objectID": "a", "first": "Ada"}]}
            })
        );
    }

    #[test]
    fn test_get_body_has_no_message() {
        let (status, body) = Envelope::from_output(Output::Contact(ada()));
        assert_eq!(status, 200);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": {"items": [{"objectID": "a", "first": "Ada"}]}})
        );
    }

    #[test]
    fn test_listing_body() {
        let (_, body) = Envelope::from_output(Output::Contacts(vec![ada()]));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"data": [{"objectID": "a", "first": "Ada"}]})
        );
    }

    #[test]
    fn test_error_body() {
        let (status, body) = Envelope::from_error(&Error::NotFound { id: "x".into() });
        assert_eq!(status, 404);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "Item not found"})
        );
    }

    #[test]
    fn test_parse_back_items() {
        let body: Envelope = serde_json::from_value(json!({
            "message": "Data successfully updated",
            "data": {"items": [{"objectID": "a", "first": "Ada"}]}
        }))
        .unwrap();
        assert_eq!(body.into_record(), Some(ada()));
    }
}
