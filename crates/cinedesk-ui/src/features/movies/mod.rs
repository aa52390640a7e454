//! Movie catalogue feature.
//!
//! # Design
//! - Table cell texts and filter mapping live in `logic` and run natively.
//! - HTTP goes through the shared `Movies` handle only; the page never builds
//!   endpoints itself.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
