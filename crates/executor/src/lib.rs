//! Command execution layer for the access ledger
//!
//! The executor is the single entry point for running operations against an
//! [`AccessLogStore`](accesslog_primitives::AccessLogStore). Every operation
//! is a [`Command`]; every successful result is an [`Output`].
//!
//! ## Design
//!
//! - Commands are plain serde enums so they can cross a process boundary
//! - Write commands run under a commit lock, so the store's check-then-write
//!   is atomic with respect to every other invocation on the same executor
//! - Read commands take no lock
//! - [`Executor::invoke`] dispatches positional string arguments by function
//!   name, the calling convention of a chaincode host
//!
//! # Example
//!
//! ```ignore
//! use accesslog_executor::{Command, Executor, Output};
//!
//! let executor = Executor::new(backend);
//! let key = executor.invoke("create_access_log", &["user1", "badge", "t1"])?;
//! let json = executor.invoke("query_access_log", &[key])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod error;
mod executor;
mod handlers;
mod output;


pub use command::{Command, Function};
pub use error::{Error, Result};
pub use executor::Executor;
pub use output::Output;
