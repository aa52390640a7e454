//! Field rules shared by the dashboard forms and the CLI.
//!
//! Each rule takes the raw user input and either returns the normalised value
//! or the message to show next to the field. [`FieldErrors`] collects the
//! failures of a whole form so nothing is sent while any rule fails.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use url::Url;

use crate::users::Language;

/// Longest accepted movie title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;
/// Longest accepted username, in characters.
pub const USERNAME_MAX_CHARS: usize = 150;
/// Longest accepted first name, in characters.
pub const FIRST_NAME_MAX_CHARS: usize = 30;
/// Longest accepted last name, in characters.
pub const LAST_NAME_MAX_CHARS: usize = 150;
/// Shortest accepted password, in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Highest accepted movie rating.
pub const RATING_MAX: f64 = 10.0;

/// Result of a single field rule.
pub type FieldResult<T> = Result<T, String>;

/// Per-field validation failures for one form, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    /// No failures yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`. The first failure for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    /// Run a rule and keep its value, recording the failure under `field`.
    pub fn check<T>(&mut self, field: &'static str, result: FieldResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.insert(field, message);
                None
            }
        }
    }

    /// Message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Whether every rule passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failures sorted by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(value)` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn finish<T>(self, value: impl FnOnce() -> Option<T>) -> Result<T, Self> {
        if !self.is_empty() {
            return Err(self);
        }
        value().ok_or(self)
    }
}

impl Display for FieldErrors {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldErrors {}

fn required(raw: &str, message: &str) -> FieldResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        Err(message.to_string())
    } else {
        Ok(value.to_string())
    }
}

fn max_chars(value: String, max: usize, message: &str) -> FieldResult<String> {
    if value.chars().count() > max {
        Err(message.to_string())
    } else {
        Ok(value)
    }
}

/// Movie title: required, at most [`TITLE_MAX_CHARS`].
pub fn title(raw: &str) -> FieldResult<String> {
    let value = required(raw, "Title is required")?;
    max_chars(value, TITLE_MAX_CHARS, "Title must be less than 200 characters")
}

/// Movie synopsis: required.
pub fn description(raw: &str) -> FieldResult<String> {
    required(raw, "Description is required")
}

/// Running time in whole minutes, at least one.
pub fn duration(raw: &str) -> FieldResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(minutes) if minutes >= 1 => Ok(minutes),
        _ => Err("Duration must be at least 1 minute".to_string()),
    }
}

/// Release date in `YYYY-MM-DD`.
pub fn release_date(raw: &str) -> FieldResult<String> {
    let value = required(raw, "Release date is required")?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| "Release date must be a valid date (YYYY-MM-DD)".to_string())
}

/// Optional rating between 0 and 10; blank means unset.
pub fn rating(raw: &str) -> FieldResult<Option<f64>> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(rating) if (0.0..=RATING_MAX).contains(&rating) => Ok(Some(rating)),
        _ => Err("Rating must be between 0 and 10".to_string()),
    }
}

/// Optional absolute http(s) URL; blank is accepted and returned as empty.
pub fn optional_url(raw: &str) -> FieldResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(value.to_string()),
        _ => Err("Must be a valid URL".to_string()),
    }
}

/// Optional calendar date; blank is accepted and returned as empty.
pub fn optional_date(raw: &str) -> FieldResult<String> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }
    release_date(raw).map_err(|_| "Must be a valid date (YYYY-MM-DD)".to_string())
}

/// Genre name: required.
pub fn genre_name(raw: &str) -> FieldResult<String> {
    required(raw, "Genre name is required")
}

/// Username: required, at most [`USERNAME_MAX_CHARS`].
pub fn username(raw: &str) -> FieldResult<String> {
    let value = required(raw, "Username is required")?;
    max_chars(
        value,
        USERNAME_MAX_CHARS,
        "Username must be less than 150 characters",
    )
}

/// Email: required and shaped like `local@domain.tld`.
pub fn email(raw: &str) -> FieldResult<String> {
    let value = required(raw, "Email is required")?;
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain.contains('.')
            && !domain.contains('@')
    }) && !value.contains(char::is_whitespace);
    if valid {
        Ok(value)
    } else {
        Err("Must be a valid email address".to_string())
    }
}

/// Optional first name, at most [`FIRST_NAME_MAX_CHARS`].
pub fn first_name(raw: &str) -> FieldResult<String> {
    max_chars(
        raw.trim().to_string(),
        FIRST_NAME_MAX_CHARS,
        "First name must be less than 30 characters",
    )
}

/// Optional last name, at most [`LAST_NAME_MAX_CHARS`].
pub fn last_name(raw: &str) -> FieldResult<String> {
    max_chars(
        raw.trim().to_string(),
        LAST_NAME_MAX_CHARS,
        "Last name must be less than 150 characters",
    )
}

/// Preferred language code.
pub fn language(raw: &str) -> FieldResult<Language> {
    Language::parse(raw.trim()).ok_or_else(|| "Language must be one of en, es, fr".to_string())
}

/// New password, at least [`PASSWORD_MIN_CHARS`]. Not trimmed.
pub fn password(raw: &str) -> FieldResult<String> {
    if raw.is_empty() {
        Err("Password is required".to_string())
    } else if raw.chars().count() < PASSWORD_MIN_CHARS {
        Err("Password must be at least 8 characters".to_string())
    } else {
        Ok(raw.to_string())
    }
}

/// Confirmation must repeat `password` exactly.
pub fn password_confirm(password: &str, confirm: &str) -> FieldResult<String> {
    if password == confirm {
        Ok(confirm.to_string())
    } else {
        Err("Passwords do not match".to_string())
    }
}

/// Login form gate: both fields must be present.
pub fn login_credentials(email: &str, password: &str) -> FieldResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        Err("Please fill in all fields".to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rules() {
        assert_eq!(title("  ").unwrap_err(), "Title is required");
        assert_eq!(
            title(&"x".repeat(201)).unwrap_err(),
            "Title must be less than 200 characters"
        );
        assert_eq!(title(&"x".repeat(200)).unwrap().len(), 200);
        assert_eq!(title(" Heat ").unwrap(), "Heat");
    }

    #[test]
    fn numeric_rules() {
        assert_eq!(duration("0").unwrap_err(), "Duration must be at least 1 minute");
        assert!(duration("abc").is_err());
        assert_eq!(duration(" 95 ").unwrap(), 95);
        assert_eq!(rating("").unwrap(), None);
        assert_eq!(rating("10").unwrap(), Some(10.0));
        assert!(rating("10.5").is_err());
        assert!(rating("-1").is_err());
    }

    #[test]
    fn dates_and_urls() {
        assert_eq!(release_date("2024-02-29").unwrap(), "2024-02-29");
        assert!(release_date("2023-02-29").is_err());
        assert_eq!(release_date("").unwrap_err(), "Release date is required");
        assert_eq!(optional_date("").unwrap(), "");
        assert_eq!(optional_url("").unwrap(), "");
        assert_eq!(
            optional_url("https://img.test/p.jpg").unwrap(),
            "https://img.test/p.jpg"
        );
        assert_eq!(optional_url("ftp://x.test").unwrap_err(), "Must be a valid URL");
        assert!(optional_url("not a url").is_err());
    }

    #[test]
    fn user_rules() {
        assert!(email("admin@cine.test").is_ok());
        assert!(email("admin@cine").is_err());
        assert!(email("a b@cine.test").is_err());
        assert_eq!(email("").unwrap_err(), "Email is required");
        assert!(first_name(&"n".repeat(31)).is_err());
        assert!(last_name(&"n".repeat(150)).is_ok());
        assert_eq!(language("fr").unwrap(), Language::Fr);
        assert!(language("de").is_err());
        assert!(password("short").is_err());
        assert!(password_confirm("longenough", "longenougH").is_err());
        assert_eq!(
            login_credentials("a@b.c", "").unwrap_err(),
            "Please fill in all fields"
        );
    }

    #[test]
    fn field_errors_collect_first_failure_per_field() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.check("duration", duration("7")), Some(7));
        assert_eq!(errors.check("title", title("")), None);
        errors.insert("title", "ignored");
        errors.insert("description", "Description is required");
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "description: Description is required; title: Title is required"
        );
        assert!(errors.finish(|| Some(())).is_err());
        assert_eq!(FieldErrors::new().finish(|| Some(1)), Ok(1));
    }
}
