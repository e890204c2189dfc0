//! Output definitions
//!
//! Every successful [`Command`](crate::Command) produces exactly one
//! [`Output`] variant.

use accesslog_core::AccessLogRecord;
use serde::{Deserialize, Serialize};

/// Result payload of a successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// Key a record was stored under (CreateAccessLog)
    Key(String),
    /// A stored record (QueryAccessLog)
    Record(AccessLogRecord),
    /// Presence flag (AccessLogExists)
    Bool(bool),
    /// No payload (Flush)
    Unit,
}

impl Output {
    /// Render as the string payload returned by [`Executor::invoke`]
    ///
    /// Keys are returned bare; records as their JSON object.
    ///
    /// [`Executor::invoke`]: crate::Executor::invoke
    pub fn into_payload(self) -> Result<String, serde_json::Error> {
        match self {
            Output::Key(key) => Ok(key),
            Output::Record(record) => serde_json::to_string(&record),
            Output::Bool(b) => Ok(b.to_string()),
            Output::Unit => Ok(String::new()),
        }
    }
}
