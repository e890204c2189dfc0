//! Error types for access log operations
//!
//! [`Error`] is the single failure channel for `create` and `query`. Every
//! condition is an explicit variant; no operation signals a miss through a
//! sentinel string.
//!
//! [`BackendError`] is what a [`KeyValueBackend`](crate::traits::KeyValueBackend)
//! returns. The store wraps it in [`Error::Backend`] without interpreting it.

use thiserror::Error;

/// Failure reported by a key-value backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// I/O error from the underlying medium
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage-level failure (encoding, corrupt log, closed handle)
    #[error("storage error: {0}")]
    Storage(String),

    /// Backend cannot serve requests right now
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// Construct a storage error from anything displayable
    pub fn storage(msg: impl Into<String>) -> Self {
        BackendError::Storage(msg.into())
    }
}

/// All access log errors
#[derive(Debug, Error)]
pub enum Error {
    /// An input field is empty, oversized or malformed
    #[error("validation error: {field} {reason}")]
    Validation {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A record already exists under this key
    #[error("access log {key} already exists")]
    DuplicateKey {
        /// The colliding key
        key: String,
    },

    /// No record exists under this key
    #[error("access log {key} does not exist")]
    NotFound {
        /// The missing key
        key: String,
    },

    /// Stored bytes do not decode as a record
    #[error("corrupt record under {key}: {reason}")]
    CorruptRecord {
        /// Key whose bytes failed to decode
        key: String,
        /// Decoder message
        reason: String,
    },

    /// Propagated unchanged from the backend
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for access log operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a validation error
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if this is a duplicate-key error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::DuplicateKey { .. })
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is a corrupt-record error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Error::CorruptRecord { .. })
    }

    /// Check if this error came from the backend
    pub fn is_backend(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this is a serious/unrecoverable error
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_) | Error::CorruptRecord { .. })
    }
}
