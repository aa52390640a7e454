//! Helpers for trimming PATCH bodies down to the fields that change.

/// Clear `field` when it already holds `current`.
pub(crate) fn drop_unchanged<T: PartialEq>(field: &mut Option<T>, current: &T) {
    if field.as_ref() == Some(current) {
        *field = None;
    }
}

/// Text variant of [`drop_unchanged`]; `current` is the server value with
/// missing treated as empty.
pub(crate) fn drop_unchanged_text(field: &mut Option<String>, current: &str) {
    if field.as_deref() == Some(current) {
        *field = None;
    }
}
