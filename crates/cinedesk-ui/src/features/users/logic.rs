//! User table cells and role filter mapping.

use cinedesk_api_models::{Role, User};

use crate::core::format::display_date;

/// Value/label pairs for the role filter select.
pub const ROLE_OPTIONS: [(&str, &str); 3] =
    [("", "All roles"), ("customer", "Customer"), ("admin", "Admin")];

/// Select value for a role filter.
#[must_use]
pub const fn role_value(role: Option<Role>) -> &'static str {
    match role {
        None => "",
        Some(role) => role.as_str(),
    }
}

/// Role badge text.
#[must_use]
pub const fn role_label(user: &User) -> &'static str {
    match user.role {
        Role::Admin => "Admin",
        Role::Customer => "Customer",
    }
}

/// Status badge text.
#[must_use]
pub const fn status_label(user: &User) -> &'static str {
    if user.is_active { "Active" } else { "Inactive" }
}

/// Avatar fallback: the first letter of the username, upper-cased.
#[must_use]
pub fn initial(user: &User) -> String {
    user.username
        .chars()
        .next()
        .map(|letter| letter.to_uppercase().collect())
        .unwrap_or_default()
}

/// Avatar image URL, when the profile has one.
#[must_use]
pub fn avatar_url(user: &User) -> Option<&str> {
    user.customer_profile
        .as_ref()
        .and_then(|profile| profile.avatar_url.as_deref())
        .filter(|url| !url.trim().is_empty())
}

/// Joined column text.
#[must_use]
pub fn joined_label(user: &User) -> String {
    display_date(&user.date_joined).unwrap_or_else(|| "-".to_string())
}

/// Last login column text.
#[must_use]
pub fn last_login_label(user: &User) -> String {
    user.last_login
        .as_deref()
        .and_then(display_date)
        .unwrap_or_else(|| "Never".to_string())
}

/// Ids of the rows on screen, in server order.
#[must_use]
pub fn row_ids(rows: &[User]) -> Vec<u64> {
    rows.iter().map(|user| user.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, last_login: Option<&str>) -> User {
        let last_login = last_login.map_or("null".to_string(), |value| format!("\"{value}\""));
        serde_json::from_str(&format!(
            r#"{{"id": 3, "username": "zoe", "email": "zoe@example.com",
                "role": "{role}", "is_active": false,
                "date_joined": "2023-11-20T08:00:00Z", "last_login": {last_login}}}"#
        ))
        .expect("user decodes")
    }

    #[test]
    fn role_select_and_badges() {
        assert_eq!(role_value(None), "");
        assert_eq!(role_value(Role::parse("admin")), "admin");
        assert_eq!(role_label(&user("admin", None)), "Admin");
        assert_eq!(status_label(&user("customer", None)), "Inactive");
        for (value, _) in ROLE_OPTIONS {
            assert_eq!(role_value(Role::parse(value)), value);
        }
    }

    #[test]
    fn dates_and_never_logged_in() {
        let never = user("customer", None);
        assert_eq!(joined_label(&never), "Nov 20, 2023");
        assert_eq!(last_login_label(&never), "Never");
        let seen = user("customer", Some("2024-01-05T12:00:00Z"));
        assert_eq!(last_login_label(&seen), "Jan 5, 2024");
    }

    #[test]
    fn avatar_falls_back_to_initial() {
        let user = user("customer", None);
        assert_eq!(avatar_url(&user), None);
        assert_eq!(initial(&user), "Z");
        assert_eq!(row_ids(&[user]), vec![3]);
    }
}
