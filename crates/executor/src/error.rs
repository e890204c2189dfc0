//! Executor error type
//!
//! Wraps the ledger taxonomy and adds the failures only an invocation
//! surface can produce.

use accesslog_core::{Error as CoreError, WireError};
use serde_json::json;
use thiserror::Error;

/// Executor error
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the access log store or its backend
    #[error(transparent)]
    Ledger(#[from] CoreError),

    /// Write command on a read-only ledger
    #[error("ledger is read-only: {command} rejected")]
    ReadOnly {
        /// Name of the rejected command
        command: String,
    },
}

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Ledger(e) => e.error_code(),
            Error::ReadOnly { .. } => "ReadOnly",
        }
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        match self {
            Error::Ledger(e) => e.to_wire_error(),
            Error::ReadOnly { command } => WireError::with_details(
                self.error_code(),
                self.to_string(),
                json!({ "command": command }),
            ),
        }
    }

    /// Get the wrapped ledger error, if any
    pub fn as_ledger(&self) -> Option<&CoreError> {
        match self {
            Error::Ledger(e) => Some(e),
            Error::ReadOnly { .. } => None,
        }
    }

    /// Check if this is a read-only rejection
    pub fn is_read_only(&self) -> bool {
        matches!(self, Error::ReadOnly { .. })
    }

    /// Check if this is a duplicate-key rejection
    pub fn is_duplicate(&self) -> bool {
        self.as_ledger().map_or(false, CoreError::is_duplicate)
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.as_ledger().map_or(false, CoreError::is_not_found)
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        self.as_ledger().map_or(false, CoreError::is_validation)
    }
}

impl From<Error> for WireError {
    fn from(e: Error) -> Self {
        e.to_wire_error()
    }
}
