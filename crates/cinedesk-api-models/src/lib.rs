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
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Cinedesk admin API.
//!
//! These types mirror the JSON shapes the movie-ticketing backend emits and
//! accepts. Both the CLI and the web dashboard encode requests and decode
//! responses through them so the contract lives in one place.
//!
//! List filters know how to render themselves as query strings
//! ([`ListFilters::to_query_string`]) in the exact key order the backend
//! expects, omitting unset keys. Form field rules live in [`validation`].

pub mod auth;
pub mod error;
pub mod genres;
pub mod movies;
pub mod page;
mod patch;
pub mod query;
pub mod users;
pub mod validation;

pub use auth::{
    LOGIN_FAILED_MESSAGE, LoginRequest, LoginResponse, LogoutRequest, LogoutResponse,
    ProfileResponse, SessionProfile, login_error_message,
};
pub use error::{ServerErrorBody, fallback_error_body};
pub use genres::{
    CreateGenreRequest, Genre, GenreDetail, GenreFilters, GenreOrdering, UpdateGenreRequest,
};
pub use movies::{
    BatchDeleteMoviesRequest, BatchDeleteMoviesResponse, CreateMovieRequest, Movie, MovieFilters,
    MovieOrdering, UpdateMovieRequest,
};
pub use page::{DeleteResponse, Page};
pub use query::{ListFilters, SortKey, decode_query, encode_query};
pub use users::{
    BatchDeleteUsersResponse, BatchDeleteUsersRequest, CreateUserRequest, CustomerProfile,
    Language, Role, UpdateUserRequest, User, UserFilters, UserOrdering,
};
pub use validation::FieldErrors;
