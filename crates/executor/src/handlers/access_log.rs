//! Access log command handlers

use accesslog_core::KeyValueBackend;
use accesslog_primitives::AccessLogStore;

use crate::{Output, Result};

/// Handle CreateAccessLog command.
pub(crate) fn create_access_log<B: KeyValueBackend>(
    store: &AccessLogStore<B>,
    user_id: &str,
    access_method: &str,
    timestamp: &str,
) -> Result<Output> {
    let key = store.create(user_id, access_method, timestamp)?;
    Ok(Output::Key(key.into_string()))
}

/// Handle QueryAccessLog command.
pub(crate) fn query_access_log<B: KeyValueBackend>(
    store: &AccessLogStore<B>,
    key: &str,
) -> Result<Output> {
    Ok(Output::Record(store.query(key)?))
}

/// Handle AccessLogExists command.
pub(crate) fn access_log_exists<B: KeyValueBackend>(
    store: &AccessLogStore<B>,
    key: &str,
) -> Result<Output> {
    Ok(Output::Bool(store.exists(key)?))
}

/// Handle Flush command.
pub(crate) fn flush<B: KeyValueBackend>(store: &AccessLogStore<B>) -> Result<Output> {
    store
        .backend()
        .flush()
        .map_err(accesslog_core::Error::from)?;
    Ok(Output::Unit)
}
