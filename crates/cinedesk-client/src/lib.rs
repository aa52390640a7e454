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
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Client-side data layer for the Cinedesk admin API.
//!
//! Layers, leaves first:
//! - [`http::ApiClient`]: one JSON request per call, bearer auth from the
//!   session, non-2xx mapped to [`ClientError::Api`].
//! - [`session::SessionStore`]: where tokens and the signed-in user live.
//! - [`cache::QueryCache`]: keyed response cache with prefix invalidation and
//!   superseded-fetch detection.
//! - [`resources`]: typed handles (`Movies`, `Genres`, `Users`, `Auth`) that
//!   combine the three and apply the invalidation rules after mutations.
//!
//! The crate builds for native targets (CLI, tests) and `wasm32` (dashboard).

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;

pub use cache::{FetchOutcome, FetchTicket, KeyPrefix, QueryCache, QueryKey, Resource, Scope};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, SessionError};
pub use http::ApiClient;
pub use resources::{Auth, Genres, Movies, Users};
pub use session::{MemorySessionStore, SessionStore, SharedSession};

#[cfg(not(target_arch = "wasm32"))]
pub use session::FileSessionStore;
