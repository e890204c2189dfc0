//! AccessLogStore: access event ledger primitive
//!
//! ## Design: STATELESS FACADE
//!
//! AccessLogStore holds ONLY its backend and the input limits. No caches,
//! no maps, no locks. All data lives in the backend under
//! [`LogKey`]s of the form `{user_id}_{timestamp}`.
//!
//! ## Key Lifecycle
//!
//! ```text
//! absent --create--> present
//! ```
//!
//! There is no transition back to absent (no delete) and no
//! present -> present transition (create on a present key is rejected).
//!
//! ## Concurrency Precondition
//!
//! `create` is check-then-write: one `get`, then one `put`. The store does
//! not make that pair atomic. It is only race-free when the caller runs each
//! `create` inside a transaction the backend or host isolates (a ledger
//! platform does; `accesslog-executor` does via its commit lock). Against a
//! plain shared key-value store, two concurrent `create`s of the same key can
//! both pass the existence check and the later `put` wins.

use accesslog_core::{AccessLogRecord, Error, KeyValueBackend, Limits, LogKey, Result};
use tracing::{debug, error, warn};

/// Access log primitive over an injected backend
///
/// # Example
///
/// ```
/// use accesslog_primitives::AccessLogStore;
/// use accesslog_storage::MemoryBackend;
///
/// let store = AccessLogStore::new(MemoryBackend::new());
/// let key = store.create("user1", "manual", "2024-07-22T12:00:00Z").unwrap();
/// assert_eq!(key.as_str(), "user1_2024-07-22T12:00:00Z");
///
/// let record = store.query(key.as_str()).unwrap();
/// assert_eq!(record.access_method, "manual");
/// ```
#[derive(Debug, Clone)]
pub struct AccessLogStore<B> {
    backend: B,
    limits: Limits,
}

impl<B: KeyValueBackend> AccessLogStore<B> {
    /// Create a store over `backend` with default limits
    pub fn new(backend: B) -> Self {
        Self::with_limits(backend, Limits::default())
    }

    /// Create a store over `backend` with explicit limits
    pub fn with_limits(backend: B, limits: Limits) -> Self {
        Self { backend, limits }
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the active limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Derive the key a record for `(user_id, timestamp)` is stored under
    ///
    /// Pure; does not touch the backend.
    pub fn derive_key(user_id: &str, timestamp: &str) -> LogKey {
        LogKey::derive(user_id, timestamp)
    }

    // ========================================================================
    // Create
    // ========================================================================

    /// Record an access event
    ///
    /// # Returns
    ///
    /// The key the record was stored under, for later [`query`](Self::query).
    ///
    /// # Errors
    ///
    /// - `Validation` if any field is empty or exceeds its limit
    /// - `DuplicateKey` if a record for this user and timestamp already exists;
    ///   the existing record is left untouched
    /// - `Backend` if the existence check or the write fails
    pub fn create(&self, user_id: &str, access_method: &str, timestamp: &str) -> Result<LogKey> {
        self.limits
            .validate_record(user_id, access_method, timestamp)?;

        let record = AccessLogRecord::new(user_id, access_method, timestamp);
        let key = record.key();

        let present = self.backend.contains(key.as_str()).map_err(|e| {
            error!(key = %key, error = %e, "existence check failed");
            e
        })?;
        if present {
            warn!(key = %key, "rejecting duplicate access log");
            return Err(Error::DuplicateKey {
                key: key.into_string(),
            });
        }

        let bytes = record
            .to_bytes()
            .map_err(|e| Error::Internal(format!("record encoding failed: {}", e)))?;
        self.backend.put(key.as_str(), bytes).map_err(|e| {
            error!(key = %key, error = %e, "access log write failed");
            e
        })?;

        debug!(key = %key, access_method, "created access log");
        Ok(key)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Load the record stored under `key`
    ///
    /// # Errors
    ///
    /// - `Validation` if `key` is empty
    /// - `NotFound` if nothing is stored under `key`
    /// - `CorruptRecord` if the stored bytes are not a valid record
    /// - `Backend` if the read fails
    pub fn query(&self, key: &str) -> Result<AccessLogRecord> {
        self.limits.validate_key(key)?;

        let bytes = self
            .backend
            .get(key)
            .map_err(|e| {
                error!(key, error = %e, "access log read failed");
                e
            })?
            .ok_or_else(|| Error::NotFound {
                key: key.to_string(),
            })?;

        let record = AccessLogRecord::from_bytes(&bytes).map_err(|e| Error::CorruptRecord {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        debug!(key, "queried access log");
        Ok(record)
    }

    /// Check whether a record exists under `key`
    ///
    /// Does not decode the stored bytes. Like [`query`](Self::query), the
    /// key is only checked for emptiness; field limits apply to `create`.
    pub fn exists(&self, key: &str) -> Result<bool> {
        self.limits.validate_key(key)?;
        Ok(self.backend.contains(key)?)
    }
}
