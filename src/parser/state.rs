//! Processor states and the processor interface
//!
//! Every sequence family is handled by one [`Processor`]. A processor is
//! fed one character at a time and answers with the [`ProcessorState`] the
//! dispatcher should be in for the next character:
//!
//! - `Ready`: nothing in progress, the next character is dispatched on its
//!   own merit
//! - anything else: the owning processor receives the next character
//!
//! Running out of input mid-sequence is not an error; the processor keeps
//! its partial state and returns its own state so the sequence resumes when
//! the next chunk is delivered.

use crate::config::TerminalConfig;
use crate::core::{Clipboard, Document, ReplySink, TerminalModel};

use super::reader::TerminalReader;

/// Terminal modes the dispatcher can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessorState {
    /// No sequence in progress
    #[default]
    Ready,
    /// Accumulating a run of printable text
    Text,
    /// After ESC, waiting for the rest of an escape sequence
    Esc,
    /// Inside a CSI (Control Sequence Introducer) sequence
    Csi,
    /// Inside an OSC (Operating System Command) string
    Osc,
    /// Inside a DCS, SOS, PM or APC string, discarded up to its terminator
    ControlString,
}

/// Everything a processor may read or mutate while handling a character
///
/// Borrowed from the owning terminal for the duration of one `write`.
pub struct TerminalContext<'a> {
    pub reader: &'a mut TerminalReader,
    pub model: &'a mut TerminalModel,
    pub document: &'a mut dyn Document,
    pub clipboard: &'a mut dyn Clipboard,
    pub replies: &'a mut dyn ReplySink,
    pub config: &'a TerminalConfig,
}

/// Handler for one sequence family
pub trait Processor {
    /// Handle one character and return the state for the next one
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState;

    /// Drop any partially processed sequence
    fn reset(&mut self);
}
