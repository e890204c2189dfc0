//! Input limits and validation for access log fields
//!
//! Every field of an [`AccessLogRecord`](crate::types::AccessLogRecord) must
//! be non-empty. User ids and access methods are length-capped and must not
//! contain NUL. Timestamps are opaque: only emptiness is checked, unless a
//! cap is configured.
//!
//! Limits apply to new records only. Reads accept any non-empty key so that
//! records written under wider limits stay readable.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum user id length in bytes
pub const DEFAULT_MAX_USER_ID_LEN: usize = 256;
/// Default maximum access method length in bytes
pub const DEFAULT_MAX_ACCESS_METHOD_LEN: usize = 64;

/// Field length limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum user id length in bytes
    pub max_user_id_len: usize,
    /// Maximum access method length in bytes
    pub max_access_method_len: usize,
    /// Maximum timestamp length in bytes, uncapped when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_timestamp_len: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_user_id_len: DEFAULT_MAX_USER_ID_LEN,
            max_access_method_len: DEFAULT_MAX_ACCESS_METHOD_LEN,
            max_timestamp_len: None,
        }
    }
}

impl Limits {
    /// Validate the three fields of a new record
    pub fn validate_record(
        &self,
        user_id: &str,
        access_method: &str,
        timestamp: &str,
    ) -> Result<()> {
        validate_label("user_id", user_id, self.max_user_id_len)?;
        validate_label("access_method", access_method, self.max_access_method_len)?;
        validate_non_empty("timestamp", timestamp)?;
        if let Some(max_len) = self.max_timestamp_len {
            validate_len("timestamp", timestamp, max_len)?;
        }
        Ok(())
    }

    /// Validate a key handed to `query` or `exists`
    ///
    /// Only emptiness is checked; the backend decides whether the key exists.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        validate_non_empty("key", key)
    }
}

fn validate_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

fn validate_len(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    if value.len() > max_len {
        return Err(Error::validation(
            field,
            format!("length {} exceeds maximum {}", value.len(), max_len),
        ));
    }
    Ok(())
}

fn validate_label(field: &'static str, value: &str, max_len: usize) -> Result<()> {
    validate_non_empty(field, value)?;
    validate_len(field, value, max_len)?;
    if value.contains('\0') {
        return Err(Error::validation(field, "must not contain NUL bytes"));
    }
    Ok(())
}
