//! Unified error type for the access ledger.
//!
//! This module provides a single error type that wraps the errors of every
//! layer and presents a consistent interface to users.

use accesslog_core::WireError;
use accesslog_durability::WalError;
use thiserror::Error;

/// All ledger errors.
///
/// This is the canonical error type for [`AccessLedger`](crate::AccessLedger)
/// operations. Store errors pass through unchanged so callers can match on
/// the ledger taxonomy directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the access log store (validation, duplicate, not found,
    /// corrupt record, backend)
    #[error(transparent)]
    Ledger(#[from] accesslog_core::Error),

    /// Write on a read-only ledger
    #[error("ledger is read-only: {0} rejected")]
    ReadOnly(String),

    /// The write-ahead log could not be opened or recovered
    #[error("WAL error: {0}")]
    Wal(#[from] WalError),

    /// Invalid or unreadable configuration
    #[error("config error: {0}")]
    Config(String),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the wrapped store error, if any.
    pub fn as_ledger(&self) -> Option<&accesslog_core::Error> {
        match self {
            Error::Ledger(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this is a validation error.
    pub fn is_validation(&self) -> bool {
        self.as_ledger().map_or(false, |e| e.is_validation())
    }

    /// Check if this is a duplicate-key rejection.
    pub fn is_duplicate(&self) -> bool {
        self.as_ledger().map_or(false, |e| e.is_duplicate())
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.as_ledger().map_or(false, |e| e.is_not_found())
    }

    /// Check if this is a corrupt-record error.
    pub fn is_corrupt(&self) -> bool {
        self.as_ledger().map_or(false, |e| e.is_corrupt())
    }

    /// Check if this is a read-only rejection.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Error::ReadOnly(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        match self {
            Error::Ledger(e) => e.is_serious(),
            Error::Wal(_) | Error::Internal(_) => true,
            _ => false,
        }
    }

    /// Convert to wire error format.
    pub fn to_wire_error(&self) -> WireError {
        match self {
            Error::Ledger(e) => e.to_wire_error(),
            Error::ReadOnly(_) => WireError::new("ReadOnly", self.to_string()),
            Error::Wal(_) => WireError::new("BackendError", self.to_string()),
            Error::Config(_) => WireError::new("ValidationError", self.to_string()),
            Error::Internal(_) => WireError::new("Internal", self.to_string()),
        }
    }
}

// Convert from executor errors
impl From<accesslog_executor::Error> for Error {
    fn from(e: accesslog_executor::Error) -> Self {
        match e {
            accesslog_executor::Error::Ledger(e) => Error::Ledger(e),
            accesslog_executor::Error::ReadOnly { command } => Error::ReadOnly(command),
        }
    }
}

// Convert from TOML parse errors
impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
