//! keywatch: Key-Value Store Inspector
//!
//! Exposes a small JSON API (and a dashboard) for reading and editing entries of
//! a persistent key-value store, plus a watch list of tracked keys that is kept
//! inside the same store.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod init;
pub mod logging;
pub mod router;
pub mod server;
pub mod store;
pub mod watch_list;
