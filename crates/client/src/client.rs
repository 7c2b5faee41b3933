//! Blocking HTTP client for the contacts API

use std::time::Duration;

use rolodex_core::{Contact, ContactDraft, ContactId, ContactPatch, Timestamp};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::error::{Error, Result};
use crate::{matching, sort};

/// Default API location
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Deadline for a whole request, from connect to the last body byte
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Where the API lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port; no trailing slash needed
    pub base_url: String,
    /// Deadline for each request as a whole
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Config for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
struct ItemsBody {
    data: ItemsData,
}

#[derive(Deserialize)]
struct ItemsData {
    items: Vec<Contact>,
}

/// Client data-access layer
///
/// Every call is a single request. Failures are logged and returned; nothing
/// is retried.
#[derive(Debug, Clone)]
pub struct ContactsClient {
    agent: ureq::Agent,
    base_url: String,
}

impl Default for ContactsClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ContactsClient {
    /// Build a client from `config`
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .timeout_connect(config.timeout)
            .timeout_read(config.timeout)
            .timeout_write(config.timeout)
            .build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The API location requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/api/data/<id>`, or the listing URL `<base>/api/data/` without an id
    fn api_url(&self, id: Option<&ContactId>) -> Result<Url> {
        let invalid = |reason: String| Error::InvalidUrl(format!("{}: {}", self.base_url, reason));
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("can not carry a path".into()))?
            .pop_if_empty()
            .extend(["api", "data", id.map_or("", ContactId::as_str)]);
        Ok(url)
    }

    /// All contacts sorted for display, narrowed by `query` when given
    ///
    /// The server may answer with a bare array or with `{"data": [...]}`.
    pub fn list_contacts(&self, query: Option<&str>) -> Result<Vec<Contact>> {
        let url = self
            .api_url(None)
            .map_err(|e| log_failure("list contacts", e))?;
        let mut request = self.agent.get(url.as_str()).set("Accept", "application/json");
        if let Some(q) = query {
            request = request.query("query", q);
        }

        let body = self.send(request, None, "list contacts")?;
        let mut contacts = decode_listing(body).map_err(|e| log_failure("list contacts", e))?;

        sort::sort_contacts(&mut contacts);
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => Ok(matching::filter_contacts(contacts, q)),
            None => Ok(contacts),
        }
    }

    /// Create a contact with a fresh identifier and creation time
    pub fn create_contact(&self, draft: ContactDraft) -> Result<Contact> {
        let id = ContactId::generate();
        let payload = Value::Object(draft.into_payload(Timestamp::now()));
        let url = self
            .api_url(Some(&id))
            .map_err(|e| log_failure("create contact", e))?;
        let request = self.agent.post(url.as_str()).set("Accept", "application/json");

        let body = self.send(request, Some(payload), "create contact")?;
        decode_record(body).map_err(|e| log_failure("create contact", e))
    }

    /// One contact, or `None` if the server does not know it
    pub fn get_contact(&self, id: &ContactId) -> Result<Option<Contact>> {
        let url = self.api_url(Some(id)).map_err(|e| log_failure("get contact", e))?;
        let request = self.agent.get(url.as_str()).set("Accept", "application/json");
        self.send_for_record(request, None, "get contact")
    }

    /// Apply `patch` and return the record as the server stored it
    pub fn update_contact(&self, id: &ContactId, patch: ContactPatch) -> Result<Option<Contact>> {
        let payload = Value::Object(patch.into());
        let url = self
            .api_url(Some(id))
            .map_err(|e| log_failure("update contact", e))?;
        let request = self
            .agent
            .request("PATCH", url.as_str())
            .set("Accept", "application/json");
        self.send_for_record(request, Some(payload), "update contact")
    }

    /// Remove a contact and return what was removed
    pub fn delete_contact(&self, id: &ContactId) -> Result<Option<Contact>> {
        let url = self
            .api_url(Some(id))
            .map_err(|e| log_failure("delete contact", e))?;
        let request = self.agent.delete(url.as_str()).set("Accept", "application/json");
        self.send_for_record(request, None, "delete contact")
    }

    fn send_for_record(
        &self,
        request: ureq::Request,
        payload: Option<Value>,
        action: &'static str,
    ) -> Result<Option<Contact>> {
        match self.send(request, payload, action) {
            Ok(body) => decode_record(body)
                .map(Some)
                .map_err(|e| log_failure(action, e)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Issue `request` and decode the JSON body
    ///
    /// 404 is returned as an error without being logged; callers that treat
    /// it as absence turn it into `None`.
    fn send(
        &self,
        request: ureq::Request,
        payload: Option<Value>,
        action: &'static str,
    ) -> Result<Value> {
        debug!(action, url = request.url(), "api request");
        let outcome = match payload {
            Some(payload) => request.send_json(payload),
            None => request.call(),
        };

        match outcome {
            Ok(response) => response
                .into_json::<Value>()
                .map_err(|e| log_failure(action, Error::Decode(e.to_string()))),
            Err(ureq::Error::Status(404, response)) => Err(Error::Status {
                code: 404,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(log_failure(action, Error::Status { code, body }))
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(log_failure(action, Error::Transport(transport.to_string())))
            }
        }
    }
}

fn log_failure(action: &'static str, err: Error) -> Error {
    error!(action, error = %err, "api request failed");
    err
}

fn decode_listing(body: Value) -> Result<Vec<Contact>> {
    let records = match body {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("data") {
            Some(data @ Value::Array(_)) => data,
            _ => {
                return Err(Error::UnexpectedShape(
                    "expected an array or an object with a `data` array".into(),
                ))
            }
        },
        _ => {
            return Err(Error::UnexpectedShape(
                "expected an array or an object with a `data` array".into(),
            ))
        }
    };
    serde_json::from_value(records).map_err(|e| Error::Decode(e.to_string()))
}

fn decode_record(body: Value) -> Result<Contact> {
    let body: ItemsBody = serde_json::from_value(body)
        .map_err(|e| Error::UnexpectedShape(format!("expected {{data: {{items: [...]}}}}: {}", e)))?;
    body.data
        .items
        .into_iter()
        .next()
        .ok_or_else(|| Error::UnexpectedShape("response carried no record".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_listing_accepts_both_shapes() {
        let record = json!({"objectID": "a", "first": "Ada"});
        assert_eq!(decode_listing(json!([record.clone()])).unwrap().len(), 1);
        assert_eq!(decode_listing(json!({"data": [record]})).unwrap().len(), 1);
        assert_eq!(decode_listing(json!({"data": []})).unwrap().len(), 0);
    }

    #[test]
    fn test_decode_listing_rejects_other_shapes() {
        for body in [json!({"items": []}), json!("x"), json!({"data": {"items": []}})] {
            assert!(matches!(decode_listing(body), Err(Error::UnexpectedShape(_))));
        }
    }

    #[test]
    fn test_decode_record() {
        let body = json!({"message": "Data successfully added", "data": {"items": [{"objectID": "a"}]}});
        assert_eq!(decode_record(body).unwrap().object_id.as_str(), "a");
        assert!(decode_record(json!({"data": {"items": []}})).is_err());
        assert!(decode_record(json!({"data": []})).is_err());
    }

    fn cid(s: &str) -> ContactId {
        ContactId::new(s).unwrap()
    }

    #[test]
    fn test_api_url_escapes_identifier() {
        let client = ContactsClient::new(ClientConfig::new("http://example.test"));
        let url = |id: &str| client.api_url(Some(&cid(id))).unwrap().to_string();

        assert_eq!(url("abc-123"), "http://example.test/api/data/abc-123");
        assert_eq!(url("a b/c"), "http://example.test/api/data/a%20b%2Fc");
        assert_eq!(url("é"), "http://example.test/api/data/%C3%A9");
        assert_eq!(
            client.api_url(None).unwrap().as_str(),
            "http://example.test/api/data/"
        );
    }

    #[test]
    fn test_api_url_keeps_base_path() {
        let client = ContactsClient::new(ClientConfig::new("http://example.test/rolodex/"));
        assert_eq!(
            client.api_url(Some(&cid("x"))).unwrap().as_str(),
            "http://example.test/rolodex/api/data/x"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let client = ContactsClient::new(ClientConfig::new("not a url"));
        assert!(matches!(client.list_contacts(None), Err(Error::InvalidUrl(_))));
        assert!(matches!(
            client.get_contact(&cid("a")),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout, Duration::from_secs(4));

        let client = ContactsClient::new(ClientConfig::new("http://example.test/"));
        assert_eq!(client.base_url(), "http://example.test");
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is essentially never served.
        let client = ContactsClient::new(
            ClientConfig::new("http://127.0.0.1:9").timeout(Duration::from_millis(500)),
        );
        let err = client.list_contacts(None).unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "{:?}", err);
    }
}
