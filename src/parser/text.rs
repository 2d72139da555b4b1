//! Printable text processor
//!
//! Collects a run of printable characters and hands it to the document in
//! one write. The run is flushed as soon as the next character would end it
//! (a control character, or nothing left to read), so a document never sees
//! a partial run followed by more text from the same chunk.

use crate::core::{keys, ControlCharacters};

use super::state::{Processor, ProcessorState, TerminalContext};

/// Processor for runs of printable characters
#[derive(Debug, Default)]
pub struct TextProcessor {
    buffer: String,
}

impl TextProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters collected but not yet written
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Whether the run ends before the next character
    fn run_ends(ctx: &TerminalContext<'_>) -> bool {
        match ctx.reader.peek() {
            None => true,
            Some(next) => ControlCharacters::is_text_terminator(next),
        }
    }

    fn flush(&mut self, ctx: &mut TerminalContext<'_>) {
        if self.buffer.is_empty() {
            return;
        }
        ctx.document.write(&self.buffer);
        ctx.model.set(keys::WRITTEN, std::mem::take(&mut self.buffer));
    }
}

impl Processor for TextProcessor {
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        if ch == ControlCharacters::NUL {
            // NUL is dropped, but it must not strand a run that is complete
            if Self::run_ends(ctx) {
                self.flush(ctx);
            }
            return ProcessorState::Ready;
        }

        let mapped = ctx
            .model
            .update(keys::GRAPHIC_CHARACTER_SET, |set| set.map(ch));
        self.buffer.push(mapped);

        if Self::run_ends(ctx) || ctx.model.get_or(keys::INSERT_MODE, false) {
            self.flush(ctx);
            return ProcessorState::Ready;
        }

        ProcessorState::Text
    }

    fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Charset;
    use crate::parser::test_support::Harness;

    fn run(harness: &mut Harness, text: &mut TextProcessor, input: &str) -> ProcessorState {
        harness.reader.feed(input);
        let mut state = ProcessorState::Ready;
        while let Some(ch) = harness.reader.read() {
            state = text.process(ch, &mut harness.ctx());
        }
        state
    }

    #[test]
    fn test_run_written_once() {
        let mut harness = Harness::new();
        let mut text = TextProcessor::new();

        assert_eq!(run(&mut harness, &mut text, "hello"), ProcessorState::Ready);
        assert_eq!(harness.document.writes(), ["hello"]);
        assert_eq!(harness.model.get(keys::WRITTEN).map(String::as_str), Some("hello"));
        assert!(text.pending().is_empty());
    }

    #[test]
    fn test_run_stops_before_control() {
        let mut harness = Harness::new();
        let mut text = TextProcessor::new();

        harness.reader.feed("ab\rc");
        assert_eq!(
            text.process(harness.reader.read().unwrap(), &mut harness.ctx()),
            ProcessorState::Text
        );
        assert_eq!(
            text.process(harness.reader.read().unwrap(), &mut harness.ctx()),
            ProcessorState::Ready
        );
        assert_eq!(harness.document.writes(), ["ab"]);
        assert_eq!(harness.reader.read(), Some('\r'));
    }

    #[test]
    fn test_insert_mode_writes_each_character() {
        let mut harness = Harness::new();
        harness.model.set(keys::INSERT_MODE, true);
        let mut text = TextProcessor::new();

        run(&mut harness, &mut text, "xyz");
        assert_eq!(harness.document.writes(), ["x", "y", "z"]);
        assert_eq!(harness.model.get(keys::WRITTEN).map(String::as_str), Some("z"));
    }

    #[test]
    fn test_nul_is_dropped() {
        let mut harness = Harness::new();
        let mut text = TextProcessor::new();

        harness.reader.feed("ab\0");
        text.process(harness.reader.read().unwrap(), &mut harness.ctx());
        text.process(harness.reader.read().unwrap(), &mut harness.ctx());
        assert_eq!(
            text.process(harness.reader.read().unwrap(), &mut harness.ctx()),
            ProcessorState::Ready
        );
        assert_eq!(harness.document.writes(), ["ab"]);
        assert!(text.pending().is_empty());
    }

    #[test]
    fn test_nul_flushes_stranded_run() {
        let mut harness = Harness::new();
        let mut text = TextProcessor::new();

        // "a" is followed by NUL, so it is not flushed on its own
        harness.reader.feed("a\0");
        assert_eq!(
            text.process(harness.reader.read().unwrap(), &mut harness.ctx()),
            ProcessorState::Text
        );
        assert_eq!(
            text.process(harness.reader.read().unwrap(), &mut harness.ctx()),
            ProcessorState::Ready
        );
        assert_eq!(harness.document.writes(), ["a"]);
    }

    #[test]
    fn test_graphic_character_set_applied() {
        let mut harness = Harness::new();
        harness.model.update(keys::GRAPHIC_CHARACTER_SET, |set| {
            set.designate(0, Charset::DecSpecialGraphics)
        });
        let mut text = TextProcessor::new();

        run(&mut harness, &mut text, "lqk");
        assert_eq!(harness.document.writes(), ["┌─┐"]);
    }

    #[test]
    fn test_reset_drops_pending() {
        let mut harness = Harness::new();
        let mut text = TextProcessor::new();

        harness.reader.feed("ab");
        text.process(harness.reader.read().unwrap(), &mut harness.ctx());
        assert_eq!(text.pending(), "a");

        text.reset();
        assert!(text.pending().is_empty());
    }
}
