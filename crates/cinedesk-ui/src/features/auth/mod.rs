//! Sign-in page and sign-out flow.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
