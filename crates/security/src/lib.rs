//! Access control and open options for the access ledger.
//!
//! This crate provides the [`AccessMode`] and [`OpenOptions`] types used to
//! control how a ledger is opened and whether it accepts new records.

use accesslog_core::Limits;
use serde::{Deserialize, Serialize};

/// Controls whether the ledger accepts creates or is read-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Creates and queries are allowed
    #[default]
    ReadWrite,
    /// Only queries are allowed
    ReadOnly,
}

impl AccessMode {
    /// Whether creates are rejected
    pub fn is_read_only(self) -> bool {
        matches!(self, AccessMode::ReadOnly)
    }
}

/// Options for opening a ledger.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use accesslog_security::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new().access_mode(AccessMode::ReadOnly);
/// assert!(opts.access_mode.is_read_only());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOptions {
    /// Whether writes are permitted
    pub access_mode: AccessMode,
    /// Input size limits enforced on create and query
    pub limits: Limits,
}

impl OpenOptions {
    /// Read-write options with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the input limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }
}
