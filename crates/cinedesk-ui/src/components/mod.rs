//! Shared view components for the dashboard pages.
pub(crate) mod bulk_bar;
pub(crate) mod dialog;
pub(crate) mod fields;
pub(crate) mod list_controls;
pub(crate) mod list_state;
pub(crate) mod mutation;
pub(crate) mod pagination;
pub(crate) mod select_all;
pub(crate) mod shell;
pub(crate) mod status;
pub(crate) mod toast;
