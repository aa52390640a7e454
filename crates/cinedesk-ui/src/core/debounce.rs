//! Search input debounce bookkeeping.
//!
//! The component owns the timer; this type decides what a fired timer
//! commits. Every keystroke takes a new ticket and only the latest ticket may
//! commit, so a stale timer that fires late is ignored.

/// Quiet period before a typed search is committed.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Typed versus committed search text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchDebounce {
    input: String,
    committed: String,
    ticket: u64,
}

impl SearchDebounce {
    /// Start from an already committed value (e.g. restored from the URL).
    #[must_use]
    pub fn new(committed: &str) -> Self {
        Self {
            input: committed.to_string(),
            committed: committed.to_string(),
            ticket: 0,
        }
    }

    /// Text currently in the box.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last committed text.
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Whether typed text is waiting to be committed.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.input != self.committed
    }

    /// Record a keystroke; returns the ticket to hand to the timer.
    pub fn edit(&mut self, value: &str) -> u64 {
        self.input = value.to_string();
        self.ticket = self.ticket.wrapping_add(1);
        self.ticket
    }

    /// Timer fired for `ticket`. Returns the text to commit when the ticket
    /// is still current and the text differs from the committed one.
    pub fn settle(&mut self, ticket: u64) -> Option<String> {
        if ticket != self.ticket || !self.is_pending() {
            return None;
        }
        self.committed = self.input.clone();
        Some(self.committed.clone())
    }

    /// Commit immediately (Enter / search button); cancels any pending timer.
    pub fn flush(&mut self) -> Option<String> {
        self.ticket = self.ticket.wrapping_add(1);
        if !self.is_pending() {
            return None;
        }
        self.committed = self.input.clone();
        Some(self.committed.clone())
    }

    /// The committed value changed elsewhere (back button, link).
    pub fn sync(&mut self, committed: &str) {
        if self.committed != committed {
            self.committed = committed.to_string();
            self.input = committed.to_string();
            self.ticket = self.ticket.wrapping_add(1);
        }
    }
}
