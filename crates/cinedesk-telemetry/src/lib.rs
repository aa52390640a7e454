#![forbid(unsafe_code)]
#![warn(
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Logging setup shared by the Cinedesk native binaries.
//!
//! The dashboard logs through the browser console instead; this crate is only
//! linked by native front ends.

pub mod context;
pub mod error;
pub mod init;

pub use context::{CommandSpanGuard, command_span};
pub use error::{Result, TelemetryError};
pub use init::{
    DEFAULT_LOG_LEVEL, ENV_LOG_FORMAT, LogFormat, LoggingConfig, build_sha, init_logging,
};
