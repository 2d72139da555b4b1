//! Dispatch state machine
//!
//! Routes every character read from the reader either to the processor that
//! owns the current state, or, in `Ready`, decides which processor (if any)
//! starts a new sequence. The state is kept between deliveries, so a sequence
//! split across chunks continues where it stopped.

use crate::core::{keys, ControlCharacters};

use super::control_string::ControlStringProcessor;
use super::csi::ControlSequenceProcessor;
use super::escape::EscapeProcessor;
use super::osc::OperatingSystemCommandProcessor;
use super::state::{Processor, ProcessorState, TerminalContext};
use super::text::TextProcessor;

/// The dispatcher and one processor per sequence family
#[derive(Debug, Default)]
pub struct Dispatcher {
    state: ProcessorState,
    text: TextProcessor,
    escape: EscapeProcessor,
    csi: ControlSequenceProcessor,
    osc: OperatingSystemCommandProcessor,
    control_string: ControlStringProcessor,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// Process everything available in the reader
    pub fn run(&mut self, ctx: &mut TerminalContext<'_>) {
        while let Some(ch) = ctx.reader.read() {
            self.dispatch(ch, ctx);
        }
    }

    /// Process one character
    pub fn dispatch(&mut self, ch: char, ctx: &mut TerminalContext<'_>) {
        self.state = match self.state {
            ProcessorState::Ready => self.start(ch, ctx),
            ProcessorState::Text => self.text.process(ch, ctx),
            ProcessorState::Esc => self.escape.process(ch, ctx),
            ProcessorState::Csi => self.csi.process(ch, ctx),
            ProcessorState::Osc => self.osc.process(ch, ctx),
            ProcessorState::ControlString => self.control_string.process(ch, ctx),
        };
    }

    /// Drop any partial sequence and return to `Ready`
    pub fn reset(&mut self) {
        self.state = ProcessorState::Ready;
        self.text.reset();
        self.escape.reset();
        self.csi.reset();
        self.osc.reset();
        self.control_string.reset();
    }

    fn start(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        match ch {
            ControlCharacters::ESC => ProcessorState::Esc,
            ControlCharacters::CSI => ProcessorState::Csi,
            ControlCharacters::OSC => ProcessorState::Osc,
            ControlCharacters::DCS
            | ControlCharacters::SOS
            | ControlCharacters::PM
            | ControlCharacters::APC => ProcessorState::ControlString,
            // a run held back by a NUL may end at the next character
            ControlCharacters::NUL if !self.text.pending().is_empty() => self.text.process(ch, ctx),
            ControlCharacters::NUL | ControlCharacters::DEL => ProcessorState::Ready,
            _ if ControlCharacters::is_executable(ch) => {
                execute_control(ch, ctx);
                ProcessorState::Ready
            }
            // remaining C1 controls, including a stray ST
            '\u{80}'..='\u{9F}' => {
                log::debug!("Ignore C1 control {:?}", ch);
                ProcessorState::Ready
            }
            _ => self.text.process(ch, ctx),
        }
    }
}

/// Execute a C0 control character
pub(super) fn execute_control(ch: char, ctx: &mut TerminalContext<'_>) {
    match ch {
        ControlCharacters::CR
        | ControlCharacters::LF
        | ControlCharacters::VT
        | ControlCharacters::FF
        | ControlCharacters::BS
        | ControlCharacters::TAB
        | ControlCharacters::BEL => ctx.document.control(ch),
        ControlCharacters::SO => {
            ctx.model
                .update(keys::GRAPHIC_CHARACTER_SET, |set| set.shift_out());
        }
        ControlCharacters::SI => {
            ctx.model
                .update(keys::GRAPHIC_CHARACTER_SET, |set| set.shift_in());
        }
        _ => {
            log::trace!("Ignore control {:?}", ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::test_support::Harness;

    fn run(harness: &mut Harness, dispatcher: &mut Dispatcher, input: &str) {
        harness.reader.feed(input);
        dispatcher.run(&mut harness.ctx());
    }

    #[test]
    fn test_text_and_controls() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "ab\r\ncd");
        assert_eq!(harness.document.writes(), ["ab", "cd"]);
        assert_eq!(harness.document.lines(), ["ab", "cd"]);
        assert_eq!(dispatcher.state(), ProcessorState::Ready);
    }

    #[test]
    fn test_escape_introducer_consumed() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\x1b");
        assert_eq!(dispatcher.state(), ProcessorState::Esc);
        assert!(harness.document.writes().is_empty());

        run(&mut harness, &mut dispatcher, "]0;title\x07x");
        assert_eq!(dispatcher.state(), ProcessorState::Ready);
        assert_eq!(harness.model.get(keys::WINDOW_TITLE).map(String::as_str), Some("title"));
        assert_eq!(harness.document.writes(), ["x"]);
    }

    #[test]
    fn test_c1_introducers() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\u{9d}2;c1\u{9c}\u{9b}4h");
        assert_eq!(harness.model.get(keys::WINDOW_TITLE).map(String::as_str), Some("c1"));
        assert_eq!(harness.model.get(keys::INSERT_MODE), Some(&true));
    }

    #[test]
    fn test_nul_del_and_stray_c1_dropped() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\0\x7f\u{9c}a");
        assert_eq!(harness.document.writes(), ["a"]);
    }

    #[test]
    fn test_repeated_nul_keeps_write_order() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "a\0\0\rb");
        assert_eq!(harness.document.writes(), ["a", "b"]);
        assert_eq!(harness.document.lines(), ["b"]);
    }

    #[test]
    fn test_control_strings_swallowed() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\x1bP1$r0m\x1b\\\x1b_Gf=100;AAAA\x1b\\ok");
        assert_eq!(harness.document.writes(), ["ok"]);

        run(&mut harness, &mut dispatcher, "\u{90}dcs\u{9c}\u{98}sos\u{9c}\u{9e}pm\x07\u{9f}apc");
        assert_eq!(dispatcher.state(), ProcessorState::ControlString);
        run(&mut harness, &mut dispatcher, "\u{9c}!");
        assert_eq!(dispatcher.state(), ProcessorState::Ready);
        assert_eq!(harness.document.writes(), ["ok", "!"]);
    }

    #[test]
    fn test_shift_out_and_in() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\x1b)0\x0eq\x0fq");
        assert_eq!(harness.document.writes(), ["─", "q"]);
    }

    #[test]
    fn test_reset_drops_partial_sequence() {
        let mut harness = Harness::new();
        let mut dispatcher = Dispatcher::new();

        run(&mut harness, &mut dispatcher, "\x1b]0;partial");
        assert_eq!(dispatcher.state(), ProcessorState::Osc);

        dispatcher.reset();
        assert_eq!(dispatcher.state(), ProcessorState::Ready);

        run(&mut harness, &mut dispatcher, "\x07text");
        assert!(!harness.model.contains(keys::WINDOW_TITLE));
        assert_eq!(harness.document.writes(), ["text"]);
    }
}
