//! Span helpers for command execution.

use tracing::Span;
use tracing::span::EnteredSpan;

use crate::init::build_sha;

/// Keeps a command span entered until dropped.
#[derive(Debug)]
pub struct CommandSpanGuard {
    _entered: EnteredSpan,
}

impl CommandSpanGuard {
    /// The span this guard keeps entered.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::current()
    }
}

/// Enter a span tagging every event with the command name, request id and
/// build identifier.
#[must_use]
pub fn command_span(command: &str, request_id: &str) -> CommandSpanGuard {
    let span = tracing::info_span!(
        "command",
        command = %command,
        request_id = %request_id,
        build_sha = %build_sha()
    );
    CommandSpanGuard {
        _entered: span.entered(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_can_be_dropped_without_subscriber() {
        let guard = command_span("movies.list", "req-1");
        let _span = guard.span();
        drop(guard);
    }
}
