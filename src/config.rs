//! TOML configuration for opening a ledger.
//!
//! ```toml
//! path = "./ledger"
//! access_mode = "read_write"
//! strict_recovery = false
//!
//! [durability]
//! mode = "batched"
//! interval_ms = 100
//! batch_size = 1000
//!
//! [limits]
//! max_user_id_len = 256
//! max_access_method_len = 64
//! # optional; timestamps are uncapped when absent
//! max_timestamp_len = 64
//! ```
//!
//! Every field is optional. A missing `path` opens an ephemeral ledger.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use accesslog_core::Limits;
use accesslog_durability::{DurabilityMode, RecoveryOptions};
use accesslog_security::{AccessMode, OpenOptions};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ledger configuration loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Data directory; `None` for an ephemeral ledger
    pub path: Option<PathBuf>,
    /// When WAL writes are fsynced
    pub durability: DurabilityMode,
    /// Read-write or read-only
    pub access_mode: AccessMode,
    /// Refuse to open a WAL with a corrupt tail instead of truncating it
    pub strict_recovery: bool,
    /// Input size limits
    pub limits: Limits,
}

impl LedgerConfig {
    /// Read and parse a TOML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        text.parse()
    }

    /// Options the executor is opened with
    pub fn open_options(&self) -> OpenOptions {
        OpenOptions::new()
            .access_mode(self.access_mode)
            .limits(self.limits)
    }

    /// Options the WAL is recovered with
    pub fn recovery_options(&self) -> RecoveryOptions {
        if self.strict_recovery {
            RecoveryOptions::strict()
        } else {
            RecoveryOptions::permissive()
        }
    }
}

impl FromStr for LedgerConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
