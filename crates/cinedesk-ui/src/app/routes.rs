//! Routing definitions for the Cinedesk dashboard.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/dashboard")]
    Dashboard,
    #[at("/movies")]
    Movies,
    #[at("/genres")]
    Genres,
    #[at("/users")]
    Users,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Route for a redirect target produced by the gate.
    pub(crate) fn from_gate_target(path: &str) -> Self {
        Self::recognize(path).unwrap_or(Self::NotFound)
    }
}
