//! Record lifecycle: absent --create--> present, nothing else.

use accesslog::{AccessLedger, AccessLogRecord, Error, LogKey};

use crate::common::TS;

#[test]
fn create_returns_composite_key_and_query_returns_fields() {
    let ledger = AccessLedger::ephemeral().unwrap();

    let key = ledger.create("user1", "manual", TS).unwrap();
    assert_eq!(key.as_str(), "user1_2024-07-22T12:00:00Z");

    let record = ledger.query(key.as_str()).unwrap();
    assert_eq!(record, AccessLogRecord::new("user1", "manual", TS));
}

#[test]
fn second_create_with_same_user_and_time_is_rejected() {
    let ledger = AccessLedger::ephemeral().unwrap();
    ledger.create("user1", "manual", TS).unwrap();

    let err = ledger.create("user1", "badge", TS).unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(err.to_wire_error().code, "DuplicateKey");

    assert_eq!(
        ledger.query("user1_2024-07-22T12:00:00Z").unwrap().access_method,
        "manual"
    );
}

#[test]
fn same_user_distinct_timestamps_are_independent() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let k1 = ledger.create("u1", "manual", "t1").unwrap();
    let k2 = ledger.create("u1", "badge", "t2").unwrap();

    assert_ne!(k1, k2);
    assert_eq!(ledger.query(k1.as_str()).unwrap().timestamp, "t1");
    assert_eq!(ledger.query(k2.as_str()).unwrap().timestamp, "t2");
}

#[test]
fn query_of_missing_key_is_not_found() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let err = ledger.query("nonexistent_key").unwrap_err();
    assert!(err.is_not_found());
    match err {
        Error::Ledger(accesslog_core::Error::NotFound { key }) => assert_eq!(key, "nonexistent_key"),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn empty_fields_are_validation_errors() {
    let ledger = AccessLedger::ephemeral().unwrap();
    assert!(ledger.create("", "manual", TS).unwrap_err().is_validation());
    assert!(ledger.create("u", "", TS).unwrap_err().is_validation());
    assert!(ledger.create("u", "manual", "").unwrap_err().is_validation());
    assert!(ledger.query("").unwrap_err().is_validation());
}

#[test]
fn exists_tracks_creates() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let key = LogKey::derive("u", "t");
    assert!(!ledger.exists(key.as_str()).unwrap());
    ledger.create("u", "m", "t").unwrap();
    assert!(ledger.exists(key.as_str()).unwrap());
}
