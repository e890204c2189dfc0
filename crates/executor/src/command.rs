//! Command definitions
//!
//! A [`Command`] is one operation against the ledger. Commands either come
//! typed (from Rust callers) or are parsed from a function name plus
//! positional string arguments by [`Command::from_invocation`].

use std::fmt;
use std::str::FromStr;

use accesslog_core::Error as CoreError;
use serde::{Deserialize, Serialize};

/// An operation the executor can run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Record an access event
    CreateAccessLog {
        /// User the event belongs to
        #[serde(alias = "userID")]
        user_id: String,
        /// How access was obtained
        #[serde(alias = "accessMethod")]
        access_method: String,
        /// Caller-supplied event time, opaque
        timestamp: String,
    },

    /// Load the record stored under a key
    QueryAccessLog {
        /// Composite key returned by create
        key: String,
    },

    /// Check whether a record is stored under a key
    AccessLogExists {
        /// Composite key returned by create
        key: String,
    },

    /// Force buffered backend writes to stable storage
    Flush,
}

impl Command {
    /// Name used in logs and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateAccessLog { .. } => "CreateAccessLog",
            Command::QueryAccessLog { .. } => "QueryAccessLog",
            Command::AccessLogExists { .. } => "AccessLogExists",
            Command::Flush => "Flush",
        }
    }

    /// Whether the command changes ledger state
    ///
    /// Write commands are rejected on a read-only ledger and run under the
    /// commit lock.
    pub fn is_write(&self) -> bool {
        matches!(self, Command::CreateAccessLog { .. })
    }

    /// Build a command from a function name and positional arguments
    ///
    /// # Errors
    ///
    /// `Validation` if the function name is unknown or the argument count
    /// does not match the function.
    pub fn from_invocation<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Self, CoreError> {
        let function: Function = function.parse()?;

        if args.len() != function.arity() {
            return Err(CoreError::validation(
                "args",
                format!(
                    "{} expects {} argument(s), got {}",
                    function,
                    function.arity(),
                    args.len()
                ),
            ));
        }

        let arg = |i: usize| args[i].as_ref().to_string();
        Ok(match function {
            Function::CreateAccessLog => Command::CreateAccessLog {
                user_id: arg(0),
                access_method: arg(1),
                timestamp: arg(2),
            },
            Function::QueryAccessLog => Command::QueryAccessLog { key: arg(0) },
        })
    }
}

/// Invocable function names
///
/// Each function answers to a snake_case name and the camel-case names
/// older ledger clients call it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// `create_access_log`, `CreateLog`, `createLog`
    CreateAccessLog,
    /// `query_access_log`, `QueryLog`, `queryLog`
    QueryAccessLog,
}

impl Function {
    /// Number of positional arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            Function::CreateAccessLog => 3,
            Function::QueryAccessLog => 1,
        }
    }

    /// Canonical (snake_case) name
    pub fn as_str(self) -> &'static str {
        match self {
            Function::CreateAccessLog => "create_access_log",
            Function::QueryAccessLog => "query_access_log",
        }
    }
}

impl FromStr for Function {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "create_access_log" | "CreateLog" | "createLog" => Ok(Function::CreateAccessLog),
            "query_access_log" | "QueryLog" | "queryLog" => Ok(Function::QueryAccessLog),
            other => Err(CoreError::validation(
                "function",
                format!("unknown function {:?}", other),
            )),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
