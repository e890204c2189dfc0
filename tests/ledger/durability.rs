//! Records survive close/reopen; damaged WAL tails are truncated.

use std::fs::OpenOptions;

use accesslog::{AccessLedger, DurabilityMode, RecoveryOptions, WalBackend};
use accesslog_durability::WAL_FILENAME;
use tempfile::TempDir;

use crate::common::{open_strict, seed, strict_ledger, TS};

#[test]
fn records_survive_reopen() {
    let (dir, ledger) = strict_ledger();
    let keys = seed(&ledger, "alice", 5);
    drop(ledger);

    let ledger = open_strict(&dir);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(ledger.query(key).unwrap().timestamp, format!("t{}", i));
    }
}

#[test]
fn duplicate_detection_survives_reopen() {
    let (dir, ledger) = strict_ledger();
    ledger.create("user1", "manual", TS).unwrap();
    drop(ledger);

    let ledger = open_strict(&dir);
    assert!(ledger.create("user1", "badge", TS).unwrap_err().is_duplicate());
}

#[test]
fn batched_ledger_flush_then_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let ledger = AccessLedger::builder()
            .path(dir.path())
            .buffered_with(60_000, 1_000)
            .open()
            .unwrap();
        ledger.create("u", "m", "t").unwrap();
        ledger.flush().unwrap();
    }

    let ledger = open_strict(&dir);
    assert!(ledger.exists("u_t").unwrap());
}

#[test]
fn torn_tail_loses_only_the_last_record() {
    let (dir, ledger) = strict_ledger();
    seed(&ledger, "bob", 3);
    drop(ledger);

    let path = dir.path().join(WAL_FILENAME);
    let len = std::fs::metadata(&path).unwrap().len();
    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(len - 4).unwrap();
    drop(file);

    let ledger = open_strict(&dir);
    assert!(ledger.exists("bob_t0").unwrap());
    assert!(ledger.exists("bob_t1").unwrap());
    assert!(!ledger.exists("bob_t2").unwrap());

    // The lost record can be written again
    ledger.create("bob", "badge", "t2").unwrap();
}

#[test]
fn corrupt_tail_strict_recovery_refuses_to_open() {
    let (dir, ledger) = strict_ledger();
    seed(&ledger, "carol", 2);
    drop(ledger);

    let path = dir.path().join(WAL_FILENAME);
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(&path, &bytes).unwrap();

    let err = AccessLedger::builder()
        .path(dir.path())
        .strict()
        .recovery(RecoveryOptions::strict())
        .open()
        .unwrap_err();
    assert!(err.is_serious());

    // Permissive recovery drops the damaged record and keeps the rest
    let ledger = open_strict(&dir);
    assert!(ledger.exists("carol_t0").unwrap());
    assert!(!ledger.exists("carol_t1").unwrap());
}

#[test]
fn wal_backend_can_be_injected_directly() {
    let dir = TempDir::new().unwrap();
    let backend = WalBackend::open(dir.path(), DurabilityMode::Strict).unwrap();
    let store = accesslog::AccessLogStore::new(backend);

    let key = store.create("dave", "pin", TS).unwrap();
    assert_eq!(store.query(key.as_str()).unwrap().access_method, "pin");
    assert_eq!(store.backend().len(), 1);
}
