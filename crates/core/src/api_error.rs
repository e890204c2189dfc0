//! Wire encoding for access log errors
//!
//! All errors crossing the invocation surface encode to JSON as:
//! ```json
//! {
//!   "code": "NotFound",
//!   "message": "access log user1_t does not exist",
//!   "details": {"key": "user1_t"}
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! These codes are frozen and must not change:
//!
//! | Code | Description |
//! |------|-------------|
//! | ValidationError | Empty, oversized or malformed input |
//! | DuplicateKey | A record already exists under the key |
//! | NotFound | No record under the key |
//! | CorruptRecord | Stored bytes do not decode as a record |
//! | BackendError | Failure reported by the key-value backend |
//! | Internal | Bug or invariant violation |

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire error representation for JSON encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// The canonical error code (e.g., "NotFound", "DuplicateKey")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl WireError {
    /// Create a new wire error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a wire error with details
    pub fn with_details(code: impl Into<String>, message: impl Into<String>, details: Value) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }

    /// Encode as a JSON string
    pub fn to_json(&self) -> String {
        // A struct of strings and a JSON value always serializes.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"{}","message":"unencodable error"}}"#, self.code)
        })
    }
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "ValidationError",
            Error::DuplicateKey { .. } => "DuplicateKey",
            Error::NotFound { .. } => "NotFound",
            Error::CorruptRecord { .. } => "CorruptRecord",
            Error::Backend(_) => "BackendError",
            Error::Internal(_) => "Internal",
        }
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        WireError {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<Value> {
        let mut map = Map::new();
        match self {
            Error::Validation { field, reason } => {
                map.insert("field".to_string(), Value::String(field.to_string()));
                map.insert("reason".to_string(), Value::String(reason.clone()));
            }
            Error::DuplicateKey { key } | Error::NotFound { key } => {
                map.insert("key".to_string(), Value::String(key.clone()));
            }
            Error::CorruptRecord { key, reason } => {
                map.insert("key".to_string(), Value::String(key.clone()));
                map.insert("reason".to_string(), Value::String(reason.clone()));
            }
            Error::Backend(_) | Error::Internal(_) => return None,
        }
        Some(Value::Object(map))
    }
}
