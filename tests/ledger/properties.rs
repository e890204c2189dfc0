//! Property tests over arbitrary field values.

use accesslog::{AccessLedger, LogKey};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9:+.@ -]{1,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn query_after_create_returns_the_same_fields(
        user_id in field(),
        access_method in field(),
        timestamp in field(),
    ) {
        let ledger = AccessLedger::ephemeral().unwrap();
        let key = ledger.create(&user_id, &access_method, &timestamp).unwrap();
        let record = ledger.query(key.as_str()).unwrap();

        prop_assert_eq!(record.user_id, user_id);
        prop_assert_eq!(record.access_method, access_method);
        prop_assert_eq!(record.timestamp, timestamp);
    }

    #[test]
    fn created_key_is_the_derived_key(user_id in field(), timestamp in field()) {
        let ledger = AccessLedger::ephemeral().unwrap();
        let key = ledger.create(&user_id, "badge", &timestamp).unwrap();
        prop_assert_eq!(key, LogKey::derive(&user_id, &timestamp));
    }

    #[test]
    fn second_create_always_fails(user_id in field(), timestamp in field()) {
        let ledger = AccessLedger::ephemeral().unwrap();
        ledger.create(&user_id, "first", &timestamp).unwrap();
        prop_assert!(ledger.create(&user_id, "second", &timestamp).unwrap_err().is_duplicate());

        let key = LogKey::derive(&user_id, &timestamp);
        prop_assert_eq!(ledger.query(key.as_str()).unwrap().access_method, "first");
    }
}
