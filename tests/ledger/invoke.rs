//! Positional invocation through the ledger's executor.

use accesslog::AccessLedger;

use crate::common::TS;

#[test]
fn create_and_query_by_function_name() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let executor = ledger.executor();

    let key = executor
        .invoke("create_access_log", &["user1", "manual", TS])
        .unwrap();
    assert_eq!(key, "user1_2024-07-22T12:00:00Z");

    let payload = executor.invoke("QueryLog", &[key]).unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["userID"], "user1");
    assert_eq!(json["accessMethod"], "manual");
    assert_eq!(json["timestamp"], TS);
}

#[test]
fn errors_are_structured_json() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let err = ledger
        .executor()
        .invoke("queryLog", &["nonexistent_key"])
        .unwrap_err();

    let json: serde_json::Value = serde_json::from_str(&err.to_json()).unwrap();
    assert_eq!(json["code"], "NotFound");
    assert_eq!(json["details"]["key"], "nonexistent_key");
}

#[test]
fn unknown_function_and_bad_arity() {
    let ledger = AccessLedger::ephemeral().unwrap();
    let executor = ledger.executor();

    assert_eq!(
        executor.invoke("InitLedger", &[] as &[&str]).unwrap_err().code,
        "ValidationError"
    );
    assert_eq!(
        executor.invoke("createLog", &["u"]).unwrap_err().code,
        "ValidationError"
    );
}
