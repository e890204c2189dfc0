//! Storage layer for the access ledger
//!
//! This crate implements the in-memory [`KeyValueBackend`]:
//! - MemoryBackend: DashMap-sharded map of key to bytes
//!
//! The durable, file-backed backend lives in `accesslog-durability`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use accesslog_core::{BackendError, KeyValueBackend};
pub use sharded::MemoryBackend;
