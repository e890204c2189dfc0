//! Access Ledger Integration Tests
//!
//! End-to-end tests through `AccessLedger`: record lifecycle, WAL
//! durability across reopen, read-only ledgers, TOML configuration and the
//! positional invocation surface.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test ledger
//! cargo test --test ledger durability::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod config;
mod durability;
mod invoke;
mod lifecycle;
mod properties;
mod read_only;
