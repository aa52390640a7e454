//! Authentication payloads.

use serde::{Deserialize, Serialize};

use crate::error::ServerErrorBody;
use crate::users::User;

/// Message shown when a login is rejected without a recognised reason.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Body for `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body for `POST /auth/logout/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Customer profile as embedded in login and profile responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionProfile {
    /// Profile id.
    pub id: String,
    /// Login name of the owning user.
    #[serde(default)]
    pub username: String,
    /// Full name.
    #[serde(default)]
    pub full_name: String,
    /// Email of the owning user.
    #[serde(default)]
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone_number: String,
    /// Birth date.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Preferred language code (kept as a string, the server may add more).
    #[serde(default)]
    pub preferred_language: String,
    /// Booking notifications toggle.
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
}

/// Response of `POST /auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed-in user.
    pub user: User,
    /// Bearer token for subsequent calls.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Customer profile, absent for staff accounts.
    #[serde(default)]
    pub customer_profile: Option<SessionProfile>,
}

/// Response of `GET /auth/profile/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileResponse {
    /// Current user.
    pub user: User,
    /// Customer profile, absent for staff accounts.
    #[serde(default)]
    pub customer_profile: Option<SessionProfile>,
}

/// Response of `POST /auth/logout/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogoutResponse {
    /// Server confirmation message.
    pub message: String,
}

/// User-facing reason for a rejected login.
///
/// Non-field errors win, then the email message, then the password message.
#[must_use]
pub fn login_error_message(body: &ServerErrorBody) -> String {
    if let Some(message) = body.non_field_error() {
        return message;
    }
    if let Some(message) = body.field_message("email") {
        return format!("Email: {message}");
    }
    if let Some(message) = body.field_message("password") {
        return format!("Password: {message}");
    }
    LOGIN_FAILED_MESSAGE.to_string()
}
