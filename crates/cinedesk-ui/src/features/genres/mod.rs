//! Genre management feature.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
