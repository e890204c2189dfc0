//! WAL (Write-Ahead Log) entry types
//!
//! The access ledger only ever writes single keys, so the log carries one
//! entry type. There are no transaction boundaries: every entry is durable
//! on its own once its frame is fully on disk.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use accesslog_core::BackendError;

/// WAL entry types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WalEntry {
    /// Put operation
    ///
    /// Replay applies puts in log order; a later put for the same key wins.
    Put {
        /// Key being written
        key: String,
        /// Value being written
        value: Vec<u8>,
    },
}

impl WalEntry {
    /// Consume the entry, returning the key and value it writes
    pub fn into_write(self) -> (String, Vec<u8>) {
        match self {
            WalEntry::Put { key, value } => (key, value),
        }
    }
}

/// WAL errors
#[derive(Debug, Error)]
pub enum WalError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File header is missing, has the wrong magic, or an unknown version
    #[error("bad WAL header: {0}")]
    BadHeader(String),

    /// An entry in the middle of the log failed its checksum or decode
    #[error("corrupt WAL entry at offset {offset}: {reason}")]
    Corruption {
        /// Byte offset of the bad frame
        offset: u64,
        /// What failed
        reason: String,
    },

    /// Entry could not be encoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The log was opened read-only
    #[error("WAL is open read-only")]
    ReadOnly,

    /// A failed append could not be undone; the log accepts no more writes
    #[error("WAL writer disabled: {0}")]
    Poisoned(String),
}

impl From<WalError> for BackendError {
    fn from(e: WalError) -> Self {
        match e {
            WalError::Io(io_err) => BackendError::Io(io_err),
            refused @ (WalError::ReadOnly | WalError::Poisoned(_)) => {
                BackendError::Unavailable(refused.to_string())
            }
            other => BackendError::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_entry_into_write() {
        let entry = WalEntry::Put {
            key: "u_t".to_string(),
            value: b"{}".to_vec(),
        };
        let (key, value) = entry.into_write();
        assert_eq!(key, "u_t");
        assert_eq!(value, b"{}".to_vec());
    }

    #[test]
    fn test_bincode_roundtrip() {
        let entry = WalEntry::Put {
            key: "user1_2024-07-22T12:00:00Z".to_string(),
            value: br#"{"userID":"user1"}"#.to_vec(),
        };
        let encoded = bincode::serialize(&entry).expect("serialization failed");
        let decoded: WalEntry = bincode::deserialize(&encoded).expect("deserialization failed");
        assert_eq!(entry, decoded);
    }

    #[test]
    fn test_io_error_maps_to_backend_io() {
        let err = WalError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        assert!(matches!(BackendError::from(err), BackendError::Io(_)));
    }

    #[test]
    fn test_refused_writes_map_to_unavailable() {
        assert!(matches!(
            BackendError::from(WalError::ReadOnly),
            BackendError::Unavailable(_)
        ));
        match BackendError::from(WalError::Poisoned("fsync failed".to_string())) {
            BackendError::Unavailable(msg) => assert!(msg.contains("fsync failed")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_corruption_maps_to_backend_storage() {
        let err = WalError::Corruption {
            offset: 8,
            reason: "crc mismatch".to_string(),
        };
        match BackendError::from(err) {
            BackendError::Storage(msg) => assert!(msg.contains("offset 8")),
            other => panic!("Expected Storage, got {:?}", other),
        }
    }
}
