//! Opening ledgers from TOML config files.

use accesslog::{AccessLedger, AccessMode, DurabilityMode, LedgerConfig};
use tempfile::TempDir;

#[test]
fn open_with_config_file() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("data");
    let config_path = dir.path().join("ledger.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
            path = {:?}

            [durability]
            mode = "strict"

            [limits]
            max_user_id_len = 8
            "#,
            data_dir.display().to_string()
        ),
    )
    .unwrap();

    let ledger = AccessLedger::open_with_config_file(&config_path).unwrap();
    assert_eq!(ledger.path(), Some(data_dir.as_path()));
    assert_eq!(ledger.durability_mode(), DurabilityMode::Strict);
    assert_eq!(ledger.access_mode(), AccessMode::ReadWrite);

    assert!(ledger.create("short", "m", "t").is_ok());
    assert!(ledger
        .create("much-too-long-user", "m", "t")
        .unwrap_err()
        .is_validation());
    assert!(data_dir.join(accesslog_durability::WAL_FILENAME).exists());
}

#[test]
fn config_without_path_is_ephemeral() {
    let config: LedgerConfig = "access_mode = \"read_only\"".parse().unwrap();
    let ledger = AccessLedger::builder().config(config).open().unwrap();
    assert!(ledger.is_ephemeral());
    assert!(ledger.create("u", "m", "t").unwrap_err().is_read_only());
}

#[test]
fn malformed_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("ledger.toml");
    std::fs::write(&config_path, "[durability]\nmode = \"sometimes\"\n").unwrap();

    let err = AccessLedger::open_with_config_file(&config_path).unwrap_err();
    assert!(matches!(err, accesslog::Error::Config(_)));
}
