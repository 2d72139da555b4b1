//! OSC argument accumulator
//!
//! Collects the `Ps;Pt` payload of an OSC string one character at a time
//! until a terminator is seen. Terminators:
//! - BEL (xterm extension)
//! - ST as the C1 character 0x9C
//! - ST as `ESC \`
//!
//! ESC followed by anything other than `\` also ends the string; that
//! character is kept as the interrupting character so the caller can
//! re-dispatch it as the start of a new escape sequence.

use crate::core::ControlCharacters;

/// Resumable accumulator for one OSC string
#[derive(Debug, Clone)]
pub struct SystemCommandSequence {
    buffer: String,
    /// Characters kept in `buffer`
    len: usize,
    max_len: usize,
    complete: bool,
    escape_pending: bool,
    interrupted_by: Option<char>,
    overflowed: bool,
}

impl Default for SystemCommandSequence {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl SystemCommandSequence {
    /// Create an accumulator keeping at most `max_len` payload characters
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: String::with_capacity(256),
            len: 0,
            max_len,
            complete: false,
            escape_pending: false,
            interrupted_by: None,
            overflowed: false,
        }
    }

    pub fn set_max_len(&mut self, max_len: usize) {
        self.max_len = max_len;
    }

    /// Feed one character; returns true once the string is terminated.
    ///
    /// After completion the payload is frozen and further characters are
    /// ignored until [`reset`](Self::reset).
    pub fn process(&mut self, ch: char) -> bool {
        if self.complete {
            return true;
        }

        if self.escape_pending {
            self.escape_pending = false;
            if ch != '\\' {
                self.interrupted_by = Some(ch);
            }
            self.complete = true;
            return true;
        }

        match ch {
            ControlCharacters::BEL | ControlCharacters::ST => {
                self.complete = true;
            }
            ControlCharacters::ESC => {
                self.escape_pending = true;
            }
            _ if self.len >= self.max_len => {
                self.overflowed = true;
            }
            _ => {
                self.buffer.push(ch);
                self.len += 1;
            }
        }

        self.complete
    }

    /// The accumulated `Ps;Pt` payload
    pub fn get_command(&self) -> &str {
        &self.buffer
    }

    /// Payload length in characters
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Characters were dropped because the payload exceeded the limit
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    /// Character that followed an ESC ending the string, other than `\`
    pub fn interrupted_by(&self) -> Option<char> {
        self.interrupted_by
    }

    /// Clear the payload and flags for the next sequence
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.len = 0;
        self.complete = false;
        self.escape_pending = false;
        self.interrupted_by = None;
        self.overflowed = false;
    }
}
