//! Read-only ledgers serve queries, reject creates and leave the ledger
//! directory as they found it.

use std::fs;

use accesslog::{AccessLedger, AccessMode};
use accesslog_durability::WAL_FILENAME;

use crate::common::{seed, strict_ledger};

fn open_read_only(path: &std::path::Path) -> accesslog::Result<AccessLedger> {
    AccessLedger::builder().path(path).strict().read_only().open()
}

#[test]
fn read_only_reopen_serves_existing_records() {
    let (dir, ledger) = strict_ledger();
    let keys = seed(&ledger, "erin", 2);
    drop(ledger);

    let ledger = AccessLedger::builder()
        .path(dir.path())
        .strict()
        .read_only()
        .open()
        .unwrap();
    assert_eq!(ledger.access_mode(), AccessMode::ReadOnly);

    assert!(ledger.query(&keys[0]).is_ok());

    let err = ledger.create("erin", "badge", "t9").unwrap_err();
    assert!(err.is_read_only());
    assert!(!ledger.exists("erin_t9").unwrap());
}

#[test]
fn read_only_invoke_returns_read_only_code() {
    let ledger = AccessLedger::builder().read_only().open().unwrap();
    let err = ledger
        .executor()
        .invoke("CreateLog", &["u", "m", "t"])
        .unwrap_err();
    assert_eq!(err.code, "ReadOnly");
}

#[test]
fn read_only_open_does_not_repair_corrupt_tail() {
    let (dir, ledger) = strict_ledger();
    let keys = seed(&ledger, "erin", 2);
    drop(ledger);

    let wal = dir.path().join(WAL_FILENAME);
    let mut bytes = fs::read(&wal).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(&wal, &bytes).unwrap();

    let ledger = open_read_only(dir.path()).unwrap();
    assert!(ledger.query(&keys[0]).is_ok());
    assert!(!ledger.exists(&keys[1]).unwrap());
    drop(ledger);

    assert_eq!(fs::read(&wal).unwrap(), bytes);
}

#[test]
fn read_only_open_of_missing_ledger_fails_without_creating_it() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ledger");

    assert!(open_read_only(&path).is_err());
    assert!(!path.exists());
}
