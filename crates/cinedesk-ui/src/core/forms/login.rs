use cinedesk_api_models::{LoginRequest, validation};

/// Sign-in form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
}

impl LoginForm {
    /// Both fields present, or the single form-level message.
    pub fn validate(&self) -> Result<LoginRequest, String> {
        validation::login_credentials(&self.email, &self.password)?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_blocks_submit() {
        let form = LoginForm {
            email: "admin@example.com".into(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err("Please fill in all fields".to_string()));
    }

    #[test]
    fn email_is_trimmed_password_is_not() {
        let form = LoginForm {
            email: " admin@example.com ".into(),
            password: " secret ".into(),
        };
        let request = form.validate().expect("valid");
        assert_eq!(request.email, "admin@example.com");
        assert_eq!(request.password, " secret ");
    }
}
