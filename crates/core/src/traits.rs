//! Backend trait consumed by the access log store
//!
//! A backend is a durable, key-addressed byte store with single-key
//! atomicity. It offers no transactions across keys and no ordering
//! guarantees between concurrent callers.

use crate::error::BackendError;
use std::sync::Arc;

/// Key-value backend contract
///
/// Implementations must be `Send + Sync`; the store may be shared across
/// threads behind an `Arc`.
///
/// # Contract
///
/// - `get` returns `Ok(None)` for an absent key, never an error.
/// - `put` overwrites unconditionally. Duplicate detection is the caller's
///   job.
/// - Both return [`BackendError`] on I/O failure.
pub trait KeyValueBackend: Send + Sync {
    /// Store `value` under `key`
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError>;

    /// Load the value under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Check whether `key` is present
    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        Ok(self.get(key)?.is_some())
    }

    /// Force buffered writes to stable storage
    fn flush(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Arc<B> {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        (**self).contains(key)
    }

    fn flush(&self) -> Result<(), BackendError> {
        (**self).flush()
    }
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for Box<B> {
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), BackendError> {
        (**self).put(key, value)
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        (**self).get(key)
    }

    fn contains(&self, key: &str) -> Result<bool, BackendError> {
        (**self).contains(key)
    }

    fn flush(&self) -> Result<(), BackendError> {
        (**self).flush()
    }
}
