//! Toast queue and the notification texts shown after mutations.

use cinedesk_client::ClientError;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_TIMEOUT_MS: u32 = 4000;

/// Info toast when an edit changes nothing.
pub const NO_CHANGES: &str = "No changes to save";

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral notice.
    Info,
    /// Mutation succeeded.
    Success,
    /// Mutation failed.
    Error,
}

/// One notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Queue-unique id used for dismissal.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Text.
    pub message: String,
}

/// Visible toasts in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Remove a toast; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    /// Visible toasts.
    #[must_use]
    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// `"<name>" has been created successfully`
#[must_use]
pub fn created(name: &str) -> String {
    format!("\"{name}\" has been created successfully")
}

/// `"<name>" has been updated successfully`
#[must_use]
pub fn updated(name: &str) -> String {
    format!("\"{name}\" has been updated successfully")
}

/// `"<name>" has been deleted successfully`
#[must_use]
pub fn deleted(name: &str) -> String {
    format!("\"{name}\" has been deleted successfully")
}

/// `<n> <noun>(s) deleted successfully`
#[must_use]
pub fn batch_deleted(count: u64, noun: &str) -> String {
    format!("{count} {noun}(s) deleted successfully")
}

/// Error panel text for a list that failed to load.
#[must_use]
pub fn load_failed(plural: &str) -> String {
    format!("Failed to load {plural}. Please try again later.")
}

/// Toast for a failed mutation.
///
/// A rejected request whose body names `field` shows that message; anything
/// else gets the generic retry text.
#[must_use]
pub fn mutation_failed(err: &ClientError, action: &str, noun: &str, field: &str) -> String {
    if err.is_rejection()
        && let Some(message) = err.server_body().field_message(field)
    {
        return format!("Failed to {action} {noun}: {message}");
    }
    format!("Failed to {action} {noun}. Please try again.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_assigns_ids_and_dismisses() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, created("Drama"));
        let second = queue.push(ToastKind::Info, NO_CHANGES);
        assert_ne!(first, second);
        queue.dismiss(first);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "No changes to save");
        queue.dismiss(99);
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn success_texts_quote_the_name() {
        assert_eq!(deleted("Heat"), "\"Heat\" has been deleted successfully");
        assert_eq!(batch_deleted(3, "user"), "3 user(s) deleted successfully");
        assert_eq!(
            load_failed("movies"),
            "Failed to load movies. Please try again later."
        );
    }

    #[test]
    fn field_message_is_preferred_for_rejections() {
        let rejected = ClientError::Api {
            status: 400,
            body: r#"{"name":["genre with this name already exists."]}"#.to_string(),
        };
        assert_eq!(
            mutation_failed(&rejected, "create", "genre", "name"),
            "Failed to create genre: genre with this name already exists."
        );

        let server_error = ClientError::Api {
            status: 500,
            body: "{}".to_string(),
        };
        assert_eq!(
            mutation_failed(&server_error, "delete", "user", "name"),
            "Failed to delete user. Please try again."
        );
    }
}
