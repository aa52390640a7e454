//! Route gating shared by the router and tests.

/// Sign-in page.
pub const LOGIN_PATH: &str = "/login";
/// Landing page after sign-in.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: &[&str] = &[LOGIN_PATH];
/// Paths a signed-in user is bounced away from.
pub const AUTH_PATHS: &[&str] = &[LOGIN_PATH];

/// Outcome of gating a navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Render the requested page.
    Allow,
    /// Send the browser elsewhere.
    Redirect(&'static str),
}

/// Decide whether `path` may render for the current session.
#[must_use]
pub fn gate(path: &str, authenticated: bool) -> Gate {
    let path = normalize(path);
    if authenticated && AUTH_PATHS.contains(&path) {
        return Gate::Redirect(DASHBOARD_PATH);
    }
    if !authenticated && !PUBLIC_PATHS.contains(&path) {
        return Gate::Redirect(LOGIN_PATH);
    }
    Gate::Allow
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_are_sent_to_login() {
        assert_eq!(gate("/movies", false), Gate::Redirect(LOGIN_PATH));
        assert_eq!(gate("/", false), Gate::Redirect(LOGIN_PATH));
        assert_eq!(gate("/login", false), Gate::Allow);
        assert_eq!(gate("/login/", false), Gate::Allow);
    }

    #[test]
    fn signed_in_users_skip_login() {
        assert_eq!(gate("/login", true), Gate::Redirect(DASHBOARD_PATH));
        assert_eq!(gate("/users", true), Gate::Allow);
        assert_eq!(gate("/dashboard", true), Gate::Allow);
    }
}
