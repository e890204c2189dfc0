//! When appended WAL frames reach stable storage.

use serde::{Deserialize, Serialize};

/// fsync policy for WAL appends
///
/// | Mode | fsync | Records lost on crash |
/// |------|-------|-----------------------|
/// | None | never | everything |
/// | Batched | every `batch_size` writes or `interval_ms` | up to one batch |
/// | Strict | every write | none that were acknowledged |
///
/// In TOML the variant is selected by a `mode` key:
///
/// ```toml
/// [durability]
/// mode = "batched"
/// interval_ms = 100
/// batch_size = 1000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DurabilityMode {
    /// Never fsync.
    ///
    /// A ledger opened with this mode keeps records in memory only. A
    /// [`WalBackend`](crate::WalBackend) opened directly with it still
    /// appends frames.
    None,

    /// fsync before every write is acknowledged.
    Strict,

    /// fsync once `batch_size` writes are pending or `interval_ms` has
    /// passed since the last fsync. Checked on each write; there is no
    /// background flusher.
    Batched {
        /// Longest gap between fsyncs, in milliseconds
        interval_ms: u64,
        /// Most writes left unsynced
        batch_size: usize,
    },
}

impl DurabilityMode {
    /// Whether writes go to a WAL at all
    pub fn requires_wal(&self) -> bool {
        !matches!(self, DurabilityMode::None)
    }

    /// Whether each append is fsynced before it returns
    pub fn requires_immediate_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Short label for logs
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::None => "in-memory, no fsync",
            DurabilityMode::Strict => "fsync per record",
            DurabilityMode::Batched { .. } => "batched fsync",
        }
    }

    /// `Batched { interval_ms: 100, batch_size: 1000 }`
    pub fn buffered_default() -> Self {
        DurabilityMode::Batched {
            interval_ms: 100,
            batch_size: 1000,
        }
    }
}

impl Default for DurabilityMode {
    fn default() -> Self {
        Self::buffered_default()
    }
}
