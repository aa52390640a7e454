//! User administration feature.
//!
//! # Design
//! - Role and status filters share the list query with search and paging.
//! - Edits diff against the row that opened the dialog, profile included.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
