//! Sign-in outcome texts.

use cinedesk_api_models::{LOGIN_FAILED_MESSAGE, login_error_message};
use cinedesk_client::ClientError;

/// Toast after a successful sign-in.
pub const LOGIN_SUCCESS: &str = "Login successful!";

/// Toast after signing out.
pub const LOGOUT_SUCCESS: &str = "You have been signed out";

/// Toast for a failed sign-in.
///
/// Server answers are mined for the most specific message; transport and
/// decode failures get the generic text.
#[must_use]
pub fn login_failure(err: &ClientError) -> String {
    match err {
        ClientError::Api { .. } => login_error_message(&err.server_body()),
        _ => LOGIN_FAILED_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(body: &str) -> ClientError {
        ClientError::Api {
            status: 400,
            body: body.to_string(),
        }
    }

    #[test]
    fn non_field_errors_win() {
        let err = rejected(
            r#"{"non_field_errors":["Invalid credentials"],"email":["Enter a valid email address."]}"#,
        );
        assert_eq!(login_failure(&err), "Invalid credentials");
    }

    #[test]
    fn field_messages_are_prefixed() {
        assert_eq!(
            login_failure(&rejected(r#"{"password":["This field may not be blank."]}"#)),
            "Password: This field may not be blank."
        );
        assert_eq!(login_failure(&rejected("{}")), LOGIN_FAILED_MESSAGE);
    }

    #[test]
    fn undecodable_success_is_generic() {
        let err = ClientError::Decode {
            endpoint: "/auth/login/".to_string(),
            source: serde_json::from_str::<u8>("x").expect_err("not json"),
        };
        assert_eq!(login_failure(&err), LOGIN_FAILED_MESSAGE);
    }
}
