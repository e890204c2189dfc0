//! Convenient imports for the access ledger.
//!
//! ```ignore
//! use accesslog::prelude::*;
//!
//! let ledger = AccessLedger::ephemeral()?;
//! ledger.create("user1", "badge", "t1")?;
//! ```

// Main entry point
pub use crate::database::{AccessLedger, AccessLedgerBuilder};
pub use crate::config::LedgerConfig;

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use accesslog_core::{AccessLogRecord, LogKey};

// Configuration
pub use accesslog_durability::DurabilityMode;
pub use accesslog_security::AccessMode;
