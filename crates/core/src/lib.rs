//! Core types for the access ledger
//!
//! This crate defines the types shared by every other crate in the
//! workspace:
//! - [`AccessLogRecord`] and [`LogKey`]: the data model
//! - [`KeyValueBackend`]: the storage contract the store is written against
//! - [`Error`] / [`BackendError`]: the error taxonomy
//! - [`WireError`]: the JSON error format used on the invocation surface
//! - [`Limits`]: input validation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api_error;
pub mod error;
pub mod limits;
pub mod traits;
pub mod types;

pub use api_error::WireError;
pub use error::{BackendError, Error, Result};
pub use limits::Limits;
pub use traits::KeyValueBackend;
pub use types::{AccessLogRecord, LogKey};
