//! Blocking client for the authoring application's remote procedure API.
//!
//! This crate owns the wire side of waapi-helpers: a length-prefixed JSON
//! framing layer, the request/response envelope, the fixed endpoint URI
//! table, and a synchronous [`WaapiClient`] that issues one call at a time
//! over a single TCP connection.

pub mod client;
pub mod config;
pub mod error;
pub mod framing;
pub mod protocol;
pub mod uri;

pub use client::{ServerInfo, WaapiClient};
pub use config::Config;
pub use error::{Result, WaapiError};

/// Silence all library logging and return the previous level.
///
/// Useful around sequences that are expected to produce remote errors,
/// e.g. walking a hierarchy while deleting objects from it.
pub fn suppress_logs() -> log::LevelFilter {
    let old = log::max_level();
    log::set_max_level(log::LevelFilter::Off);
    old
}

/// Restore a log level previously returned by [`suppress_logs`].
pub fn set_log_level(level: log::LevelFilter) {
    log::set_max_level(level);
}
