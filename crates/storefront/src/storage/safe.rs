//! Failure-tolerant access to storage and stored JSON.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::Storage;

/// Outcome of [`safe_json_parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeParse<T> {
    /// The input was valid JSON of the requested shape.
    Parsed(T),
    /// The input could not be parsed.
    Invalid,
}

impl<T> SafeParse<T> {
    /// Whether parsing succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// The parsed value, or `None` if parsing failed.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Invalid => None,
        }
    }
}

/// Parse `raw` as JSON without ever failing.
///
/// ```
/// use kacamata_storefront::storage::{SafeParse, safe_json_parse};
///
/// let parsed: SafeParse<serde_json::Value> = safe_json_parse(r#"{"a":1}"#);
/// assert_eq!(parsed, SafeParse::Parsed(serde_json::json!({"a": 1})));
///
/// let parsed: SafeParse<serde_json::Value> = safe_json_parse("not-json");
/// assert!(!parsed.is_ok());
/// assert_eq!(parsed.into_value(), None);
/// ```
pub fn safe_json_parse<T: DeserializeOwned>(raw: &str) -> SafeParse<T> {
    match serde_json::from_str(raw) {
        Ok(value) => SafeParse::Parsed(value),
        Err(e) => {
            debug!(error = %e, "Stored value is not valid JSON");
            SafeParse::Invalid
        }
    }
}

/// A storage handle whose operations never fail.
///
/// Read errors become "no value" and write errors become `false`; both are
/// logged.
#[derive(Debug, Clone)]
pub struct SafeStorage {
    inner: Arc<dyn Storage>,
}

impl SafeStorage {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self { inner }
    }

    /// Read `key`. Absent keys and backend errors both yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match self.inner.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "Storage read failed");
                None
            }
        }
    }

    /// Write `value` under `key`. Returns whether the write succeeded.
    pub fn set(&self, key: &str, value: &str) -> bool {
        match self.inner.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Storage write failed");
                false
            }
        }
    }

    /// Serialize `value` as JSON and write it under `key`.
    ///
    /// Returns whether both serialization and the write succeeded.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.set(key, &raw),
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize value for storage");
                false
            }
        }
    }

    /// Delete `key`. Returns whether the delete succeeded.
    pub fn remove(&self, key: &str) -> bool {
        match self.inner.remove_item(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Storage delete failed");
                false
            }
        }
    }
}
