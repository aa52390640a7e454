//! Core, DOM-free primitives and helpers for the dashboard.
pub mod debounce;
pub mod format;
pub mod forms;
pub mod list;
pub mod routes;
pub mod selection;
pub mod store;
pub mod toast;
