//! Core types for the access ledger
//!
//! This module defines the fundamental types used throughout the system:
//! - [`AccessLogRecord`]: One access event (who, how, when)
//! - [`LogKey`]: The composite key a record is stored under

use serde::{Deserialize, Serialize};

/// Separator between the user id and the timestamp in a [`LogKey`].
pub const KEY_SEPARATOR: char = '_';

/// One access event
///
/// The serialized form is a UTF-8 JSON object with exactly three fields:
///
/// ```json
/// {"userID": "user1", "accessMethod": "manual", "timestamp": "2024-07-22T12:00:00Z"}
/// ```
///
/// Records written by older deployments used snake_case field names
/// (`user_id`, `access_method`); those are accepted on read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessLogRecord {
    /// Who accessed
    #[serde(rename = "userID", alias = "user_id")]
    pub user_id: String,
    /// Free-form method label ("manual", "badge", ...)
    #[serde(rename = "accessMethod", alias = "access_method")]
    pub access_method: String,
    /// Caller-supplied timestamp, opaque to the ledger
    pub timestamp: String,
}

impl AccessLogRecord {
    /// Create a new record
    ///
    /// # Examples
    ///
    /// ```
    /// use accesslog_core::types::AccessLogRecord;
    ///
    /// let record = AccessLogRecord::new("user1", "manual", "2024-07-22T12:00:00Z");
    /// assert_eq!(record.user_id, "user1");
    /// ```
    pub fn new(
        user_id: impl Into<String>,
        access_method: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            access_method: access_method.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The key this record is stored under
    pub fn key(&self) -> LogKey {
        LogKey::derive(&self.user_id, &self.timestamp)
    }

    /// Encode to the storage format (UTF-8 JSON)
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode from the storage format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Composite key for access log records
///
/// Formatted as `{user_id}_{timestamp}`. A user may hold any number of
/// records as long as their timestamps differ.
///
/// Derivation is pure: the same `(user_id, timestamp)` pair always yields the
/// same key. The key is not parsed back into its parts; a user id that itself
/// contains `_` is legal, so the split point would be ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogKey(String);

impl LogKey {
    /// Derive the key for a user and timestamp
    ///
    /// # Examples
    ///
    /// ```
    /// use accesslog_core::types::LogKey;
    ///
    /// let key = LogKey::derive("user1", "2024-07-22T12:00:00Z");
    /// assert_eq!(key.as_str(), "user1_2024-07-22T12:00:00Z");
    /// ```
    pub fn derive(user_id: &str, timestamp: &str) -> Self {
        let mut key = String::with_capacity(user_id.len() + 1 + timestamp.len());
        key.push_str(user_id);
        key.push(KEY_SEPARATOR);
        key.push_str(timestamp);
        LogKey(key)
    }

    /// Wrap an existing key string, e.g. one handed back to a caller earlier
    pub fn from_raw(key: impl Into<String>) -> Self {
        LogKey(key.into())
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the underlying string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for LogKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<LogKey> for String {
    fn from(key: LogKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for LogKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
