use cinedesk_api_models::{
    CreateUserRequest, FieldErrors, Language, UpdateUserRequest, User, validation,
};

/// Edit user dialog, including the customer profile fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    /// Username input.
    pub username: String,
    /// Email input.
    pub email: String,
    /// First name input.
    pub first_name: String,
    /// Last name input.
    pub last_name: String,
    /// Phone input.
    pub phone_number: String,
    /// Date of birth (`YYYY-MM-DD`), blank for none.
    pub date_of_birth: String,
    /// Language code from the select.
    pub preferred_language: String,
    /// Avatar URL, blank for none.
    pub avatar_url: String,
    /// Active switch.
    pub is_active: bool,
    /// Staff switch.
    pub is_staff: bool,
    /// Superuser switch.
    pub is_superuser: bool,
    /// Booking notification switch.
    pub receive_booking_notifications: bool,
}

impl UserForm {
    /// Prefill from `user`; a missing profile shows its defaults.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        let profile = user.customer_profile.as_ref();
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: profile
                .map(|profile| profile.phone_number.clone())
                .unwrap_or_default(),
            date_of_birth: profile
                .and_then(|profile| profile.date_of_birth.clone())
                .unwrap_or_default(),
            preferred_language: profile
                .map_or_else(Language::default, |profile| profile.preferred_language)
                .as_str()
                .to_string(),
            avatar_url: profile
                .and_then(|profile| profile.avatar_url.clone())
                .unwrap_or_default(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            receive_booking_notifications: profile
                .is_none_or(|profile| profile.receive_booking_notifications),
        }
    }

    /// Patch against `user`; `None` when nothing changed.
    pub fn diff(&self, user: &User) -> Result<Option<UpdateUserRequest>, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = errors.check("username", validation::username(&self.username));
        let email = errors.check("email", validation::email(&self.email));
        let first_name = errors.check("first_name", validation::first_name(&self.first_name));
        let last_name = errors.check("last_name", validation::last_name(&self.last_name));
        let date_of_birth = errors.check(
            "date_of_birth",
            validation::optional_date(&self.date_of_birth),
        );
        let preferred_language = errors.check(
            "preferred_language",
            validation::language(&self.preferred_language),
        );
        let avatar_url = errors.check("avatar_url", validation::optional_url(&self.avatar_url));

        let patch = errors.finish(|| {
            Some(UpdateUserRequest {
                username: Some(username?),
                email: Some(email?),
                first_name: Some(first_name?),
                last_name: Some(last_name?),
                is_active: Some(self.is_active),
                is_staff: Some(self.is_staff),
                is_superuser: Some(self.is_superuser),
                phone_number: Some(self.phone_number.trim().to_string()),
                date_of_birth: Some(date_of_birth?),
                preferred_language: Some(preferred_language?),
                receive_booking_notifications: Some(self.receive_booking_notifications),
                avatar_url: Some(avatar_url?),
            })
        })?;
        let patch = patch.without_unchanged(user);
        Ok((!patch.is_empty()).then_some(patch))
    }
}

/// Add user dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUserForm {
    /// Username input.
    pub username: String,
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Password confirmation input.
    pub password_confirm: String,
    /// First name input.
    pub first_name: String,
    /// Last name input.
    pub last_name: String,
    /// Active switch.
    pub is_active: bool,
    /// Staff switch.
    pub is_staff: bool,
}

impl Default for NewUserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            is_staff: false,
        }
    }
}

impl NewUserForm {
    /// Validate for registration.
    pub fn validate(&self) -> Result<CreateUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = errors.check("username", validation::username(&self.username));
        let email = errors.check("email", validation::email(&self.email));
        let password = errors.check("password", validation::password(&self.password));
        let password_confirm = errors.check(
            "password_confirm",
            validation::password_confirm(&self.password, &self.password_confirm),
        );
        let first_name = errors.check("first_name", validation::first_name(&self.first_name));
        let last_name = errors.check("last_name", validation::last_name(&self.last_name));

        errors.finish(|| {
            Some(CreateUserRequest {
                username: username?,
                email: email?,
                password: password?,
                password_confirm: password_confirm?,
                first_name: first_name.filter(|name| !name.is_empty()),
                last_name: last_name.filter(|name| !name.is_empty()),
                is_active: Some(self.is_active),
                is_staff: Some(self.is_staff),
                ..CreateUserRequest::default()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        serde_json::from_str(
            r#"{"id": 7, "username": "ada", "email": "ada@example.com",
                "first_name": "Ada", "last_name": "Lovelace", "is_active": true,
                "role": "customer", "date_joined": "2024-01-01T00:00:00Z",
                "customer_profile": {
                    "id": "p1", "phone_number": "555-0100", "date_of_birth": "1990-12-10",
                    "preferred_language": "fr", "receive_booking_notifications": false,
                    "loyalty_points": 10, "avatar_url": null,
                    "created_at": "", "updated_at": "", "full_name": "Ada Lovelace"
                }}"#,
        )
        .expect("user decodes")
    }

    #[test]
    fn untouched_user_form_has_no_changes() {
        let user = user();
        let form = UserForm::from_user(&user);
        assert_eq!(form.preferred_language, "fr");
        assert!(!form.receive_booking_notifications);
        assert_eq!(form.diff(&user).expect("valid"), None);
    }

    #[test]
    fn profile_changes_are_patched_alone() {
        let user = user();
        let mut form = UserForm::from_user(&user);
        form.preferred_language = "es".into();
        form.date_of_birth.clear();
        let patch = form.diff(&user).expect("valid").expect("changes");
        assert_eq!(
            patch,
            UpdateUserRequest {
                preferred_language: Some(Language::Es),
                date_of_birth: Some(String::new()),
                ..UpdateUserRequest::default()
            }
        );
    }

    #[test]
    fn user_without_profile_uses_defaults() {
        let mut user = user();
        user.customer_profile = None;
        let form = UserForm::from_user(&user);
        assert_eq!(form.preferred_language, "en");
        assert!(form.receive_booking_notifications);
        assert_eq!(form.diff(&user).expect("valid"), None);
    }

    #[test]
    fn edit_reports_invalid_email() {
        let user = user();
        let mut form = UserForm::from_user(&user);
        form.email = "ada.example.com".into();
        let errors = form.diff(&user).expect_err("invalid");
        assert_eq!(errors.get("email"), Some("Must be a valid email address"));
    }

    #[test]
    fn new_user_requires_matching_passwords() {
        let form = NewUserForm {
            username: "grace".into(),
            email: "grace@example.com".into(),
            password: "hopper123".into(),
            password_confirm: "hopper124".into(),
            ..NewUserForm::default()
        };
        let errors = form.validate().expect_err("mismatch");
        assert_eq!(errors.get("password_confirm"), Some("Passwords do not match"));

        let ok = NewUserForm {
            password_confirm: "hopper123".into(),
            ..form
        };
        let request = ok.validate().expect("valid");
        assert_eq!(request.first_name, None);
        assert_eq!(request.is_active, Some(true));
    }
}
