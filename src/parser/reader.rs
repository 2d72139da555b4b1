//! Pushback reader
//!
//! Cursor over the characters delivered so far. Reading never blocks: once
//! the delivered input is drained, processors return a state telling the
//! dispatcher to resume when the next chunk arrives.

use std::collections::VecDeque;

/// Input queue with a single-character pushback slot
///
/// # Caller contract
///
/// At most one character may be pushed back at a time. Calling
/// [`add_first`](Self::add_first) twice without consuming the first pushed
/// character in between is a precondition violation; debug builds panic,
/// release builds keep only the most recent character.
#[derive(Debug, Clone, Default)]
pub struct TerminalReader {
    pending: VecDeque<char>,
    pushback: Option<char>,
}

impl TerminalReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delivered chunk
    pub fn feed(&mut self, data: &str) {
        self.pending.extend(data.chars());
    }

    /// Consume and return the next character
    pub fn read(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.pending.pop_front())
    }

    /// Return the next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.pushback.or_else(|| self.pending.front().copied())
    }

    /// Push `ch` back so the next `read`/`peek` returns it
    pub fn add_first(&mut self, ch: char) {
        debug_assert!(
            self.pushback.is_none(),
            "add_first called twice without an intervening read"
        );
        self.pushback = Some(ch);
    }

    /// No character is currently available (more may still arrive)
    pub fn is_empty(&self) -> bool {
        self.pushback.is_none() && self.pending.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Number of characters currently available
    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.pushback.is_some())
    }

    /// Drop everything delivered but not yet consumed
    pub fn clear(&mut self) {
        self.pending.clear();
        self.pushback = None;
    }
}
