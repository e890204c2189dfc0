//! Durability layer for the access ledger
//!
//! This crate implements the durable [`KeyValueBackend`]:
//! - WAL: append-only write-ahead log of puts
//! - Entry encoding/decoding with CRC32 checksums
//! - Durability modes: None, Strict, Batched (default)
//! - Recovery: replay the log on open, truncating a torn tail
//!
//! [`KeyValueBackend`]: accesslog_core::KeyValueBackend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod encoding;
pub mod mode;
pub mod recovery;
pub mod wal;

pub use backend::{WalBackend, WAL_FILENAME};
pub use encoding::{decode_entry, encode_entry};
pub use mode::DurabilityMode;
pub use recovery::{RecoveryOptions, RecoveryResult};
pub use wal::{WalEntry, WalError};
