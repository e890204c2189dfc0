//! Main ledger entry point.
//!
//! This module provides the [`AccessLedger`] struct, the primary entry point
//! for recording and querying access events.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use accesslog_core::{AccessLogRecord, KeyValueBackend, Limits, LogKey};
use accesslog_durability::{DurabilityMode, RecoveryOptions, WalBackend};
use accesslog_executor::{Command, Executor, Output};
use accesslog_security::{AccessMode, OpenOptions};
use accesslog_storage::MemoryBackend;
use tracing::info;

use crate::config::LedgerConfig;
use crate::error::{Error, Result};

/// The access ledger.
///
/// Create a ledger using [`AccessLedger::open`], [`AccessLedger::ephemeral`]
/// or [`AccessLedger::builder`].
///
/// # Example
///
/// ```ignore
/// use accesslog::prelude::*;
///
/// let ledger = AccessLedger::open("./ledger")?;
///
/// let key = ledger.create("user1", "badge", "2024-07-22T12:00:00Z")?;
/// let record = ledger.query(key.as_str())?;
/// assert_eq!(record.access_method, "badge");
///
/// ledger.flush()?;
/// ```
pub struct AccessLedger {
    executor: Executor,
    path: Option<PathBuf>,
    durability: DurabilityMode,
}

impl AccessLedger {
    /// Open a ledger at the given path.
    ///
    /// Uses default settings (batched durability, read-write). An existing
    /// log in `path` is replayed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Create an ephemeral ledger with no disk I/O.
    ///
    /// All records are lost when the ledger is dropped.
    pub fn ephemeral() -> Result<Self> {
        Self::builder().open()
    }

    /// Open a ledger as described by a TOML config file.
    pub fn open_with_config_file(config_path: impl AsRef<Path>) -> Result<Self> {
        let config = LedgerConfig::from_file(config_path)?;
        Self::builder().config(config).open()
    }

    /// Create a builder for ledger configuration.
    pub fn builder() -> AccessLedgerBuilder {
        AccessLedgerBuilder::new()
    }

    /// Get the underlying executor.
    ///
    /// Use it for [`Command`]-level access or for positional
    /// [`invoke`](Executor::invoke) calls.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    // =========================================================================
    // Access Log Operations
    // =========================================================================

    /// Record an access event and return its key.
    pub fn create(&self, user_id: &str, access_method: &str, timestamp: &str) -> Result<LogKey> {
        match self.executor.execute(Command::CreateAccessLog {
            user_id: user_id.to_string(),
            access_method: access_method.to_string(),
            timestamp: timestamp.to_string(),
        })? {
            Output::Key(key) => Ok(LogKey::from_raw(key)),
            _ => Err(Error::Internal(
                "Unexpected output for CreateAccessLog".into(),
            )),
        }
    }

    /// Load the record stored under `key`.
    pub fn query(&self, key: &str) -> Result<AccessLogRecord> {
        match self.executor.execute(Command::QueryAccessLog {
            key: key.to_string(),
        })? {
            Output::Record(record) => Ok(record),
            _ => Err(Error::Internal("Unexpected output for QueryAccessLog".into())),
        }
    }

    /// Check whether a record is stored under `key`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        match self.executor.execute(Command::AccessLogExists {
            key: key.to_string(),
        })? {
            Output::Bool(exists) => Ok(exists),
            _ => Err(Error::Internal(
                "Unexpected output for AccessLogExists".into(),
            )),
        }
    }

    /// Force buffered writes to disk.
    ///
    /// In batched mode writes are fsynced in groups. Call `flush()` to
    /// ensure every acknowledged record is persisted.
    pub fn flush(&self) -> Result<()> {
        match self.executor.execute(Command::Flush)? {
            Output::Unit => Ok(()),
            _ => Err(Error::Internal("Unexpected output for Flush".into())),
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Get the ledger directory, `None` if ephemeral.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if this is an ephemeral (no-disk) ledger.
    pub fn is_ephemeral(&self) -> bool {
        self.path.is_none()
    }

    /// Get the durability mode.
    pub fn durability_mode(&self) -> DurabilityMode {
        self.durability
    }

    /// Get the access mode.
    pub fn access_mode(&self) -> AccessMode {
        self.executor.access_mode()
    }
}

impl std::fmt::Debug for AccessLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLedger")
            .field("path", &self.path)
            .field("durability", &self.durability)
            .field("executor", &self.executor)
            .finish()
    }
}

/// Builder for ledger configuration.
///
/// # Example
///
/// ```ignore
/// // Production: disk-backed, fsync on every record
/// let ledger = AccessLedger::builder()
///     .path("./ledger")
///     .strict()
///     .open()?;
///
/// // Inspection: existing ledger, no writes
/// let ledger = AccessLedger::builder()
///     .path("./ledger")
///     .read_only()
///     .open()?;
///
/// // Unit testing: no disk at all
/// let ledger = AccessLedger::ephemeral()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessLedgerBuilder {
    path: Option<PathBuf>,
    durability: DurabilityMode,
    options: OpenOptions,
    recovery: RecoveryOptions,
}

impl AccessLedgerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply every setting of a [`LedgerConfig`].
    ///
    /// Settings applied afterwards override the config.
    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.options = config.open_options();
        self.recovery = config.recovery_options();
        self.durability = config.durability;
        self.path = config.path;
        self
    }

    /// Set the ledger directory path.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the durability mode.
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Use no-durability mode.
    ///
    /// The WAL is bypassed entirely; even with a path set, nothing is
    /// written to disk.
    pub fn no_durability(self) -> Self {
        self.durability(DurabilityMode::None)
    }

    /// Use buffered mode (default).
    ///
    /// Default flush interval: 100ms or 1000 writes.
    pub fn buffered(self) -> Self {
        self.durability(DurabilityMode::buffered_default())
    }

    /// Use buffered mode with custom parameters.
    pub fn buffered_with(self, flush_interval_ms: u64, max_pending_writes: usize) -> Self {
        self.durability(DurabilityMode::Batched {
            interval_ms: flush_interval_ms,
            batch_size: max_pending_writes,
        })
    }

    /// Use strict mode (fsync on every record).
    pub fn strict(self) -> Self {
        self.durability(DurabilityMode::Strict)
    }

    /// Set the access mode.
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.options = self.options.access_mode(mode);
        self
    }

    /// Open read-only: creates are rejected and the ledger directory is
    /// never written to. With a path, the WAL must already exist.
    pub fn read_only(self) -> Self {
        self.access_mode(AccessMode::ReadOnly)
    }

    /// Set the input limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options = self.options.limits(limits);
        self
    }

    /// Set how a damaged WAL tail is handled on open.
    pub fn recovery(mut self, options: RecoveryOptions) -> Self {
        self.recovery = options;
        self
    }

    /// Open the ledger.
    ///
    /// Without a path, or with no durability, the ledger is held in memory
    /// only. Otherwise the WAL in the path is opened (and replayed if it
    /// exists). A read-only ledger replays an existing WAL without creating,
    /// writing or truncating anything.
    pub fn open(self) -> Result<AccessLedger> {
        let (backend, path) = match self.path {
            Some(path) if self.durability.requires_wal() => {
                let wal = if self.options.access_mode.is_read_only() {
                    WalBackend::open_read_only(&path, self.recovery)?
                } else {
                    WalBackend::open_with(&path, self.durability, self.recovery)?
                };
                info!(
                    path = %path.display(),
                    records = wal.len(),
                    durability = self.durability.description(),
                    access_mode = ?self.options.access_mode,
                    "opened access ledger"
                );
                let backend: Arc<dyn KeyValueBackend> = Arc::new(wal);
                (backend, Some(path))
            }
            _ => {
                info!(access_mode = ?self.options.access_mode, "opened ephemeral access ledger");
                let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
                (backend, None)
            }
        };

        Ok(AccessLedger {
            executor: Executor::with_options(backend, self.options),
            path,
            durability: self.durability,
        })
    }
}
