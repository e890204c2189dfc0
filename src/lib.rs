//! # accesslog
//!
//! Key-addressed ledger of access events.
//!
//! Each record says that a user gained access by some method at some time.
//! Records are created once under the composite key
//! `{user_id}_{timestamp}` and never updated or deleted.
//!
//! ## Quick Start
//!
//! ```ignore
//! use accesslog::prelude::*;
//!
//! let ledger = AccessLedger::open("./ledger")?;
//!
//! let key = ledger.create("user1", "manual", "2024-07-22T12:00:00Z")?;
//! assert_eq!(key.as_str(), "user1_2024-07-22T12:00:00Z");
//!
//! let record = ledger.query(key.as_str())?;
//! ```
//!
//! ## Layers
//!
//! - [`AccessLogStore`] - create/query over any [`KeyValueBackend`]
//! - [`Executor`] - commands, commit lock, read-only checks, positional
//!   `invoke`
//! - [`AccessLedger`] - opens a backend (WAL file or memory) and wires the
//!   layers together

#![warn(missing_docs)]

mod config;
mod database;
mod error;

pub mod prelude;

// Re-export main entry points
pub use config::LedgerConfig;
pub use database::{AccessLedger, AccessLedgerBuilder};
pub use error::{Error, Result};

// Re-export layers
pub use accesslog_core::{AccessLogRecord, KeyValueBackend, Limits, LogKey, WireError};
pub use accesslog_durability::{DurabilityMode, RecoveryOptions, WalBackend};
pub use accesslog_executor::{Command, Executor, Output};
pub use accesslog_primitives::AccessLogStore;
pub use accesslog_security::{AccessMode, OpenOptions};
pub use accesslog_storage::MemoryBackend;
