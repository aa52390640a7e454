//! Feature slices: one per sidebar destination plus sign-in.
pub mod auth;
pub mod genres;
pub mod movies;
pub mod users;
