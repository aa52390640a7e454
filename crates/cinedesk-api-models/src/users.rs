//! User administration DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::patch::{drop_unchanged, drop_unchanged_text};
use crate::query::{ListFilters, SortKey, non_empty, paging_accessors, parse_bool, parse_positive};

/// Account role.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular ticket buyer.
    #[default]
    Customer,
    /// Dashboard administrator.
    Admin,
}

impl Role {
    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Preferred interface language of a customer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
    /// French.
    Fr,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 3] = [Self::En, Self::Es, Self::Fr];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fr => "French",
        }
    }

    /// Parse a wire value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.as_str() == value)
    }
}

/// Customer profile attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerProfile {
    /// Profile id.
    pub id: String,
    /// Phone number, possibly empty.
    #[serde(default)]
    pub phone_number: String,
    /// Birth date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Preferred language.
    #[serde(default)]
    pub preferred_language: Language,
    /// Whether booking notifications are enabled.
    #[serde(default)]
    pub receive_booking_notifications: bool,
    /// Loyalty balance.
    #[serde(default)]
    pub loyalty_points: u64,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Server-computed full name.
    #[serde(default)]
    pub full_name: String,
}

/// User account.
///
/// The login and profile endpoints return a slimmer shape, so the admin-only
/// flags fall back to `false` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Numeric id.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Whether the account can sign in.
    #[serde(default)]
    pub is_active: bool,
    /// Django staff flag.
    #[serde(default)]
    pub is_staff: bool,
    /// Django superuser flag.
    #[serde(default)]
    pub is_superuser: bool,
    /// Registration timestamp.
    #[serde(default)]
    pub date_joined: String,
    /// Last sign-in timestamp.
    #[serde(default)]
    pub last_login: Option<String>,
    /// Role.
    #[serde(default)]
    pub role: Role,
    /// Server-computed admin flag.
    #[serde(default)]
    pub is_admin: bool,
    /// Customer profile, when the user has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_profile: Option<CustomerProfile>,
}

impl User {
    /// `first last`, falling back to the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Sort keys accepted by `GET /auth/admin/users/`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserOrdering {
    /// `-date_joined`
    #[serde(rename = "-date_joined")]
    Newest,
    /// `date_joined`
    #[serde(rename = "date_joined")]
    Oldest,
    /// `username`
    #[serde(rename = "username")]
    UsernameAsc,
    /// `-username`
    #[serde(rename = "-username")]
    UsernameDesc,
    /// `email`
    #[serde(rename = "email")]
    EmailAsc,
    /// `-email`
    #[serde(rename = "-email")]
    EmailDesc,
    /// `first_name`
    #[serde(rename = "first_name")]
    FirstNameAsc,
    /// `-first_name`
    #[serde(rename = "-first_name")]
    FirstNameDesc,
    /// `last_name`
    #[serde(rename = "last_name")]
    LastNameAsc,
    /// `-last_name`
    #[serde(rename = "-last_name")]
    LastNameDesc,
}

impl SortKey for UserOrdering {
    const ALL: &'static [Self] = &[
        Self::Newest,
        Self::Oldest,
        Self::UsernameAsc,
        Self::UsernameDesc,
        Self::EmailAsc,
        Self::EmailDesc,
        Self::FirstNameAsc,
        Self::FirstNameDesc,
        Self::LastNameAsc,
        Self::LastNameDesc,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "-date_joined",
            Self::Oldest => "date_joined",
            Self::UsernameAsc => "username",
            Self::UsernameDesc => "-username",
            Self::EmailAsc => "email",
            Self::EmailDesc => "-email",
            Self::FirstNameAsc => "first_name",
            Self::FirstNameDesc => "-first_name",
            Self::LastNameAsc => "last_name",
            Self::LastNameDesc => "-last_name",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::UsernameAsc => "Username A-Z",
            Self::UsernameDesc => "Username Z-A",
            Self::EmailAsc => "Email A-Z",
            Self::EmailDesc => "Email Z-A",
            Self::FirstNameAsc => "Name A-Z",
            Self::FirstNameDesc => "Name Z-A",
            Self::LastNameAsc => "Last Name A-Z",
            Self::LastNameDesc => "Last Name Z-A",
        }
    }
}

/// Filters for the user list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    /// Role filter.
    pub role: Option<Role>,
    /// Free-text search.
    pub search: Option<String>,
    /// Active flag.
    pub is_active: Option<bool>,
    /// Sort key.
    pub ordering: Option<UserOrdering>,
    /// 1-based page.
    pub page: Option<u32>,
    /// Records per page.
    pub page_size: Option<u32>,
}

impl ListFilters for UserFilters {
    paging_accessors!(UserOrdering);

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(active) = self.is_active {
            pairs.push(("is_active", active.to_string()));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("page_size", page_size.to_string()));
        }
        pairs
    }

    fn from_query_pairs(pairs: &[(String, String)]) -> Self {
        let mut filters = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "role" => filters.role = Role::parse(value),
                "search" => filters.search = non_empty(Some(value.clone())),
                "is_active" => filters.is_active = parse_bool(value),
                "ordering" => filters.ordering = UserOrdering::parse(value),
                "page" => filters.page = parse_positive(value),
                "page_size" => filters.page_size = parse_positive(value),
                _ => {}
            }
        }
        filters
    }
}

/// Registration payload for `POST /auth/register/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation; the server checks it matches.
    pub password_confirm: String,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Active flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Staff flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    /// Superuser flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Birth date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<Language>,
    /// Booking notifications toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_booking_notifications: Option<bool>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Body for `PATCH /auth/admin/users/{id}/`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Active flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Staff flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    /// Superuser flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Birth date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Preferred language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<Language>,
    /// Booking notifications toggle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_booking_notifications: Option<bool>,
    /// Avatar URL; an empty string clears it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UpdateUserRequest {
    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Drop every field that already matches `user`.
    ///
    /// Profile fields compare against the customer profile; a user without
    /// one counts as empty text, English and notifications on.
    #[must_use]
    pub fn without_unchanged(mut self, user: &User) -> Self {
        let profile = user.customer_profile.as_ref();
        drop_unchanged_text(&mut self.username, &user.username);
        drop_unchanged_text(&mut self.email, &user.email);
        drop_unchanged_text(&mut self.first_name, &user.first_name);
        drop_unchanged_text(&mut self.last_name, &user.last_name);
        drop_unchanged(&mut self.is_active, &user.is_active);
        drop_unchanged(&mut self.is_staff, &user.is_staff);
        drop_unchanged(&mut self.is_superuser, &user.is_superuser);
        drop_unchanged_text(
            &mut self.phone_number,
            profile.map_or("", |profile| profile.phone_number.as_str()),
        );
        drop_unchanged_text(
            &mut self.date_of_birth,
            profile
                .and_then(|profile| profile.date_of_birth.as_deref())
                .unwrap_or_default(),
        );
        drop_unchanged(
            &mut self.preferred_language,
            &profile.map_or_else(Language::default, |profile| profile.preferred_language),
        );
        drop_unchanged(
            &mut self.receive_booking_notifications,
            &profile.is_none_or(|profile| profile.receive_booking_notifications),
        );
        drop_unchanged_text(
            &mut self.avatar_url,
            profile
                .and_then(|profile| profile.avatar_url.as_deref())
                .unwrap_or_default(),
        );
        self
    }
}

/// Body for `POST /auth/admin/users/batch-delete/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchDeleteUsersRequest {
    /// Ids to delete.
    pub user_ids: Vec<u64>,
}

/// Response of `POST /auth/admin/users/batch-delete/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchDeleteUsersResponse {
    /// Server confirmation message.
    pub message: String,
    /// Number of deleted records.
    pub deleted_count: u64,
    /// Ids actually deleted.
    #[serde(default)]
    pub deleted_users: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_filters_follow_backend_order() {
        let filters = UserFilters {
            role: Some(Role::Admin),
            search: Some("ann".into()),
            is_active: Some(false),
            ordering: Some(UserOrdering::EmailDesc),
            page: Some(2),
            page_size: Some(50),
        };
        assert_eq!(
            filters.to_query_string(),
            "?role=admin&search=ann&is_active=false&ordering=-email&page=2&page_size=50"
        );
    }

    #[test]
    fn slim_login_user_decodes_with_defaults() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "username": "ada", "email": "ada@example.com",
                "first_name": "", "last_name": "", "role": "admin",
                "is_admin": true, "date_joined": "2024-01-01T00:00:00Z"}"#,
        )
        .expect("user decodes");
        assert_eq!(user.role, Role::Admin);
        assert!(!user.is_staff);
        assert!(user.customer_profile.is_none());
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn language_round_trips_wire_value() {
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.as_str()), Some(lang));
        }
        assert_eq!(Language::parse("de"), None);
    }

    #[test]
    fn profile_defaults_count_as_unchanged() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "username": "ada", "email": "ada@example.com",
                "first_name": "Ada", "last_name": "", "role": "customer",
                "is_active": true, "date_joined": "2024-01-01T00:00:00Z"}"#,
        )
        .expect("user decodes");
        let patch = UpdateUserRequest {
            username: Some("ada".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            phone_number: Some(String::new()),
            preferred_language: Some(Language::En),
            receive_booking_notifications: Some(true),
            is_active: Some(true),
            ..UpdateUserRequest::default()
        }
        .without_unchanged(&user);
        assert_eq!(
            patch,
            UpdateUserRequest {
                last_name: Some("Lovelace".into()),
                ..UpdateUserRequest::default()
            }
        );
    }
}
