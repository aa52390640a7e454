//! Dialog form state.
//!
//! # Design
//! - Inputs stay as raw strings so editing is lossless; conversion happens on
//!   submit through the shared field rules.
//! - `validate` runs before any request and reports every failing field.
//! - `diff` compares against the record being edited and yields `None` when
//!   nothing changed, so the dialog can close without a request.

pub mod genre;
pub mod login;
pub mod movie;
pub mod user;

pub use genre::GenreForm;
pub use login::LoginForm;
pub use movie::MovieForm;
pub use user::{NewUserForm, UserForm};
