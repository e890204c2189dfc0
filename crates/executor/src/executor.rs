//! The command executor

use std::sync::Arc;

use accesslog_core::{Error as CoreError, KeyValueBackend, WireError};
use accesslog_primitives::AccessLogStore;
use accesslog_security::{AccessMode, OpenOptions};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::handlers;
use crate::{Command, Error, Output, Result};

/// Runs [`Command`]s against an access log store
///
/// The executor owns the hosting-platform half of the store's contract:
/// each write command runs as one transaction under `commit_lock`, so the
/// existence check and the write inside `create` cannot interleave with
/// another create on this executor.
///
/// Two executors over the same non-transactional backend do not share the
/// lock and can still race.
pub struct Executor {
    store: AccessLogStore<Arc<dyn KeyValueBackend>>,
    access_mode: AccessMode,
    /// Commit serialization lock
    ///
    /// Held from the duplicate check through the backend write.
    commit_lock: Mutex<()>,
}

impl Executor {
    /// Create a read-write executor with default limits
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_options(backend, OpenOptions::default())
    }

    /// Create an executor with explicit options
    pub fn with_options(backend: Arc<dyn KeyValueBackend>, options: OpenOptions) -> Self {
        Self {
            store: AccessLogStore::with_limits(backend, options.limits),
            access_mode: options.access_mode,
            commit_lock: Mutex::new(()),
        }
    }

    /// Access mode this executor enforces
    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    /// Get the underlying store
    pub fn store(&self) -> &AccessLogStore<Arc<dyn KeyValueBackend>> {
        &self.store
    }

    // =========================================================================
    // Typed execution
    // =========================================================================

    /// Execute a command
    ///
    /// # Errors
    ///
    /// - `ReadOnly` for a write command on a read-only executor
    /// - any ledger error the handler returns
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        if cmd.is_write() && self.access_mode.is_read_only() {
            warn!(command = cmd.name(), "rejecting write on read-only ledger");
            return Err(Error::ReadOnly {
                command: cmd.name().to_string(),
            });
        }

        debug!(command = cmd.name(), "executing");

        match cmd {
            Command::CreateAccessLog {
                user_id,
                access_method,
                timestamp,
            } => {
                let _commit_guard = self.commit_lock.lock();
                handlers::create_access_log(&self.store, &user_id, &access_method, &timestamp)
            }
            Command::QueryAccessLog { key } => handlers::query_access_log(&self.store, &key),
            Command::AccessLogExists { key } => handlers::access_log_exists(&self.store, &key),
            Command::Flush => handlers::flush(&self.store),
        }
    }

    /// Record an access event, returning its key
    pub fn create_access_log(
        &self,
        user_id: &str,
        access_method: &str,
        timestamp: &str,
    ) -> Result<String> {
        match self.execute(Command::CreateAccessLog {
            user_id: user_id.to_string(),
            access_method: access_method.to_string(),
            timestamp: timestamp.to_string(),
        })? {
            Output::Key(key) => Ok(key),
            _ => Err(unexpected_output("CreateAccessLog")),
        }
    }

    /// Load the record under `key` as a JSON object string
    pub fn query_access_log(&self, key: &str) -> Result<String> {
        let output = self.execute(Command::QueryAccessLog {
            key: key.to_string(),
        })?;
        match output {
            Output::Record(_) => output.into_payload().map_err(|e| {
                Error::Ledger(CoreError::Internal(format!("record encoding failed: {}", e)))
            }),
            _ => Err(unexpected_output("QueryAccessLog")),
        }
    }

    // =========================================================================
    // Positional invocation
    // =========================================================================

    /// Invoke a function by name with positional string arguments
    ///
    /// Returns the string payload: the key for a create, the record JSON for
    /// a query. Every failure, including an unknown function or wrong
    /// argument count, comes back as a [`WireError`].
    pub fn invoke<S: AsRef<str>>(
        &self,
        function: &str,
        args: &[S],
    ) -> std::result::Result<String, WireError> {
        let cmd = Command::from_invocation(function, args).map_err(|e| e.to_wire_error())?;
        let output = self.execute(cmd)?;
        output.into_payload().map_err(|e| {
            CoreError::Internal(format!("payload encoding failed: {}", e)).to_wire_error()
        })
    }
}

fn unexpected_output(command: &str) -> Error {
    Error::Ledger(CoreError::Internal(format!(
        "Unexpected output for {}",
        command
    )))
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("access_mode", &self.access_mode)
            .field("limits", self.store.limits())
            .finish()
    }
}
