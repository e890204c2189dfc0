//! Command handlers
//!
//! One function per command. Handlers are free functions over the store;
//! locking and access checks happen in the [`Executor`](crate::Executor)
//! before a handler runs.

mod access_log;

pub(crate) use access_log::*;
