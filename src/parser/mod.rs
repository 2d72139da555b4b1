//! Terminal control stream interpreter
//!
//! A streaming, character-at-a-time state machine. Input arrives as chunks
//! of already decoded text; sequences may be split at any point between
//! chunks and resume when the rest arrives.
//!
//! - [`TerminalReader`]: delivered characters plus a single pushback slot
//! - [`Dispatcher`]: routes characters by [`ProcessorState`]
//! - one [`Processor`] per family: text, ESC, CSI, OSC and the DCS/APC
//!   family of control strings, which is swallowed

mod control_string;
mod csi;
mod dispatch;
mod escape;
mod osc;
mod reader;
mod sequence;
mod state;
mod text;

pub use control_string::ControlStringProcessor;
pub use csi::ControlSequenceProcessor;
pub use dispatch::Dispatcher;
pub use escape::EscapeProcessor;
pub use osc::{color_reply, OperatingSystemCommandProcessor};
pub use reader::TerminalReader;
pub use sequence::SystemCommandSequence;
pub use state::{Processor, ProcessorState, TerminalContext};
pub use text::TextProcessor;
