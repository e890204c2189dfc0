//! Sharded in-memory backend
//!
//! DashMap + FxHash. Lock-free reads, sharded writes, O(1) lookups.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, lock-free reads
//! - FxHash: fast non-crypto hash, keys are caller-chosen strings
//! - Write counter: monotonically increasing, one tick per `put`
//!
//! Nothing survives a drop. Use it for tests, caches and hosts that persist
//! elsewhere.

use accesslog_core::{BackendError, KeyValueBackend};
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Sharded in-memory key-value backend
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): Lock-free read via DashMap
/// - put(): Only locks the target shard
///
/// Single-key atomicity only. A `get` followed by a `put` from the same
/// caller is two independent operations.
///
/// # Example
///
/// ```
/// use accesslog_core::KeyValueBackend;
/// use accesslog_storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// backend.put("k", b"v".to_vec()).unwrap();
/// assert_eq!(backend.get("k").unwrap(), Some(b"v".to_vec()));
/// ```
pub struct MemoryBackend {
    data: DashMap<String, Vec<u8>, FxBuildHasher>,
    /// Total writes applied
    writes: AtomicU64,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            data: DashMap::with_hasher(FxBuildHasher::default()),
            writes: AtomicU64::new(0),
        }
    }

    /// Create with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: DashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            writes: AtomicU64::new(0),
        }
    }

    /// Build a backend pre-populated with `entries` (used by WAL replay)
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        let backend = Self::new();
        for (key, value) in entries {
            backend.data.insert(key, value);
        }
        backend
    }

    /// Number of keys stored
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the backend is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total `put` calls applied
    #[inline]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Acquire)
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for MemoryBackend {
    #[inline]
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError> {
        self.data.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    #[inline]
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.data.get(key).map(|entry| entry.value().clone()))
    }

    #[inline]
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        Ok(self.data.contains_key(key))
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("len", &self.len())
            .field("writes", &self.write_count())
            .finish()
    }
}
