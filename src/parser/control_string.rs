//! DCS / SOS / PM / APC string processor
//!
//! `ESC P`, `ESC X`, `ESC ^` and `ESC _` (C1 0x90, 0x98, 0x9E, 0x9F) open
//! strings that carry device or application data the interpreter does not
//! act on. The payload is consumed up to the terminator so none of it is
//! written to the document. Terminators are the same as for OSC strings.

use super::sequence::SystemCommandSequence;
use super::state::{Processor, ProcessorState, TerminalContext};

/// Processor that swallows a control string
#[derive(Debug)]
pub struct ControlStringProcessor {
    /// Only used for terminator detection; keeps no payload
    sequence: SystemCommandSequence,
    /// Characters consumed in the current string
    consumed: usize,
}

impl Default for ControlStringProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlStringProcessor {
    pub fn new() -> Self {
        Self {
            sequence: SystemCommandSequence::new(0),
            consumed: 0,
        }
    }
}

impl Processor for ControlStringProcessor {
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        ctx.reader.add_first(ch);

        loop {
            let Some(next) = ctx.reader.read() else {
                return ProcessorState::ControlString;
            };
            if self.sequence.process(next) {
                break;
            }
            self.consumed += 1;
            if ctx.reader.is_empty() {
                return ProcessorState::ControlString;
            }
        }

        log::debug!("Ignore control string ({} characters)", self.consumed);

        let state = match self.sequence.interrupted_by() {
            Some(interrupt) => {
                ctx.reader.add_first(interrupt);
                ProcessorState::Esc
            }
            None => ProcessorState::Ready,
        };

        self.reset();
        state
    }

    fn reset(&mut self) {
        self.sequence.reset();
        self.consumed = 0;
    }
}
