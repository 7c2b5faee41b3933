//! Identifier and time types
//!
//! - [`ContactId`]: unique identifier of a contact record
//! - [`Timestamp`]: milliseconds since the Unix epoch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a contact
///
/// On the wire and in the store file this is the `objectID` member. Two
/// identifiers are equal only if their strings are byte-for-byte equal; no
/// case folding or numeric coercion is applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Create an identifier, rejecting empty or whitespace-only input
    ///
    /// # Examples
    ///
    /// ```
    /// use rolodex_core::ContactId;
    ///
    /// let id = ContactId::new("abc").unwrap();
    /// assert_eq!(id.as_str(), "abc");
    /// assert!(ContactId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::InvalidInput("identifier must not be empty".into()));
        }
        Ok(ContactId(id))
    }

    /// Create a new random identifier using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use rolodex_core::ContactId;
    ///
    /// let a = ContactId::generate();
    /// let b = ContactId::generate();
    /// assert_ne!(a, b);
    /// ```
    pub fn generate() -> Self {
        ContactId(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContactId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ContactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ContactId::new(s)
    }
}

/// Milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Current wall-clock time
    pub fn now() -> Self {
        Timestamp(chrono::Utc::now().timestamp_millis())
    }

    /// Wrap a raw millisecond count
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Raw millisecond count
    pub const fn as_millis(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match chrono::DateTime::from_timestamp_millis(self.0) {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.3f UTC")),
            None => write!(f, "{}ms", self.0),
        }
    }
}
