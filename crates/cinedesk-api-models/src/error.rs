//! Server error bodies.
//!
//! The backend rejects requests with a JSON object keyed by field name, each
//! value being a list of messages (`{"name": ["genre with this name already
//! exists."]}`), plus the special keys `non_field_errors` and `detail`.

use serde_json::{Map, Value};

/// Body sent when a failed response could not be parsed as JSON.
#[must_use]
pub fn fallback_error_body() -> String {
    "{}".to_string()
}

/// Parsed view over a server error body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerErrorBody {
    fields: Map<String, Value>,
}

impl ServerErrorBody {
    /// Parse a raw body; anything that is not a JSON object yields an empty view.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Whether the body carries no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First message reported for `field`.
    ///
    /// Accepts both the list form (`["msg"]`) and a bare string.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<String> {
        match self.fields.get(field)? {
            Value::Array(items) => items.iter().find_map(|item| match item {
                Value::String(text) => Some(text.clone()),
                _ => None,
            }),
            Value::String(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// First entry of `non_field_errors`.
    #[must_use]
    pub fn non_field_error(&self) -> Option<String> {
        self.field_message("non_field_errors")
    }

    /// Every entry of `non_field_errors`.
    #[must_use]
    pub fn non_field_errors(&self) -> Vec<String> {
        match self.fields.get("non_field_errors") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(text)) => vec![text.clone()],
            _ => Vec::new(),
        }
    }

    /// `detail` message, as emitted for auth and permission failures.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        self.field_message("detail")
    }

    /// `(field, first message)` for every field-level key, sorted by field.
    #[must_use]
    pub fn field_errors(&self) -> Vec<(String, String)> {
        self.fields
            .keys()
            .filter(|key| key.as_str() != "non_field_errors" && key.as_str() != "detail")
            .filter_map(|key| self.field_message(key).map(|msg| (key.clone(), msg)))
            .collect()
    }

    /// One-line human summary (detail, then non-field errors, then fields).
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if let Some(detail) = self.detail() {
            return Some(detail);
        }
        let mut parts = self.non_field_errors();
        parts.extend(
            self.field_errors()
                .into_iter()
                .map(|(field, msg)| format!("{field}: {msg}")),
        );
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_message_takes_first_entry() {
        let body = ServerErrorBody::parse(r#"{"name": ["already exists.", "too short"]}"#);
        assert_eq!(body.field_message("name").as_deref(), Some("already exists."));
        assert_eq!(body.field_message("title"), None);
    }

    #[test]
    fn unparseable_body_is_empty() {
        assert!(ServerErrorBody::parse("<html>oops</html>").is_empty());
        assert!(ServerErrorBody::parse(&fallback_error_body()).is_empty());
        assert_eq!(ServerErrorBody::parse("[]").summary(), None);
    }

    #[test]
    fn summary_prefers_detail_then_lists_everything() {
        let detail = ServerErrorBody::parse(r#"{"detail": "Not found."}"#);
        assert_eq!(detail.summary().as_deref(), Some("Not found."));

        let mixed = ServerErrorBody::parse(
            r#"{"non_field_errors": ["Invalid credentials"], "email": ["Enter a valid email."]}"#,
        );
        assert_eq!(mixed.non_field_error().as_deref(), Some("Invalid credentials"));
        assert_eq!(
            mixed.summary().as_deref(),
            Some("Invalid credentials; email: Enter a valid email.")
        );
    }
}
