//! Primitives for the access ledger
//!
//! ## Design
//!
//! [`AccessLogStore`] is a stateless facade over any [`KeyValueBackend`].
//! It owns validation, key derivation, duplicate rejection and record
//! encoding; the backend owns bytes.
//!
//! [`KeyValueBackend`]: accesslog_core::KeyValueBackend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access_log;

pub use access_log::AccessLogStore;

#[cfg(test)]
mod traced_tests;
