use crate::AccessLogStore;
use accesslog_storage::MemoryBackend;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with captured tracing output
fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (logs.contents(), result)
}

#[test]
fn create_logs_key_at_debug() {
    let store = AccessLogStore::new(MemoryBackend::new());
    let (logs, result) = with_tracing(|| store.create("user1", "badge", "t1"));

    assert!(result.is_ok());
    assert!(logs.contains("created access log"), "logs: {}", logs);
    assert!(logs.contains("user1_t1"), "logs: {}", logs);
}

#[test]
fn duplicate_create_logs_warning() {
    let store = AccessLogStore::new(MemoryBackend::new());
    store.create("user1", "badge", "t1").unwrap();

    let (logs, result) = with_tracing(|| store.create("user1", "manual", "t1"));

    assert!(result.unwrap_err().is_duplicate());
    assert!(logs.contains("WARN"), "logs: {}", logs);
    assert!(logs.contains("rejecting duplicate access log"), "logs: {}", logs);
}

#[test]
fn failed_query_logs_nothing() {
    let store = AccessLogStore::new(MemoryBackend::new());
    let (logs, result) = with_tracing(|| store.query("missing_key"));

    assert!(result.unwrap_err().is_not_found());
    assert!(!logs.contains("queried access log"), "logs: {}", logs);
}

#[test]
fn backend_failure_logs_error() {
    use accesslog_core::{BackendError, KeyValueBackend};

    struct Offline;

    impl KeyValueBackend for Offline {
        fn put(&self, _key: &str, _value: Vec<u8>) -> Result<(), BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }

        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, BackendError> {
            Err(BackendError::Unavailable("offline".to_string()))
        }
    }

    let store = AccessLogStore::new(Offline);
    let (logs, result) = with_tracing(|| store.query("u_t"));

    assert!(result.unwrap_err().is_backend());
    assert!(logs.contains("ERROR"), "logs: {}", logs);
    assert!(logs.contains("access log read failed"), "logs: {}", logs);
}
