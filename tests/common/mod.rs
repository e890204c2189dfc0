//! Shared test utilities for the integration suites.

#![allow(dead_code)]

use accesslog::{AccessLedger, DurabilityMode};
use tempfile::TempDir;

/// Timestamp used by fixtures that do not care about time
pub const TS: &str = "2024-07-22T12:00:00Z";

/// A disk-backed ledger in a fresh temp directory
///
/// The directory is removed when the returned `TempDir` drops; keep it alive
/// for as long as the ledger (or a reopened one) is in use.
pub fn strict_ledger() -> (TempDir, AccessLedger) {
    let dir = TempDir::new().unwrap();
    let ledger = open_strict(&dir);
    (dir, ledger)
}

/// Open (or reopen) a strict ledger in `dir`
pub fn open_strict(dir: &TempDir) -> AccessLedger {
    AccessLedger::builder()
        .path(dir.path())
        .durability(DurabilityMode::Strict)
        .open()
        .unwrap()
}

/// Seed `n` records for one user with timestamps `t0..t{n-1}`
pub fn seed(ledger: &AccessLedger, user_id: &str, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            ledger
                .create(user_id, "badge", &format!("t{}", i))
                .unwrap()
                .into_string()
        })
        .collect()
}
