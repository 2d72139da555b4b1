//! ESC sequence processor
//!
//! Receives the characters following an ESC that the dispatcher consumed.
//! Introducers for CSI and OSC hand over to their processors; character set
//! designations wait for their final character, which may arrive in a later
//! chunk.

use crate::core::{keys, Charset, ControlCharacters};

use super::dispatch::execute_control;
use super::state::{Processor, ProcessorState, TerminalContext};

/// Intermediate seen after ESC, waiting for the final character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intermediate {
    /// `(`, `)`, `*`, `+`: designate into G0-G3
    Designate(u8),
    /// Any other intermediate; the sequence is consumed and ignored
    Other(char),
}

/// Processor for `ESC <intermediate>* <final>` sequences
#[derive(Debug, Default)]
pub struct EscapeProcessor {
    intermediate: Option<Intermediate>,
}

impl EscapeProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn dispatch_final(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        match ch {
            '[' => return ProcessorState::Csi,
            ']' => return ProcessorState::Osc,
            // DCS, SOS, PM, APC
            'P' | 'X' | '^' | '_' => return ProcessorState::ControlString,
            // stray ST
            '\\' => {}
            'N' => single_shift(2, ctx),
            'O' => single_shift(3, ctx),
            '=' => ctx.model.set(keys::APPLICATION_KEYPAD, true),
            '>' => ctx.model.set(keys::APPLICATION_KEYPAD, false),
            'c' => full_reset(ctx),
            _ => {
                log::debug!("Ignore ESC {:?}", ch);
            }
        }
        ProcessorState::Ready
    }
}

impl Processor for EscapeProcessor {
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        match ch {
            ControlCharacters::ESC => {
                // ESC ESC restarts the sequence
                self.intermediate = None;
                return ProcessorState::Esc;
            }
            // CAN / SUB cancel the sequence
            '\u{18}' | '\u{1A}' => {
                self.intermediate = None;
                return ProcessorState::Ready;
            }
            _ if ControlCharacters::is_executable(ch) => {
                execute_control(ch, ctx);
                return ProcessorState::Esc;
            }
            _ => {}
        }

        if let Some(intermediate) = self.intermediate.take() {
            match (intermediate, ch) {
                (Intermediate::Designate(slot), '\u{30}'..='\u{7E}') => {
                    let charset = Charset::from_designation(ch);
                    log::debug!("Designate G{}: {:?}", slot, charset);
                    ctx.model
                        .update(keys::GRAPHIC_CHARACTER_SET, |set| set.designate(slot, charset));
                }
                (_, '\u{20}'..='\u{2F}') => {
                    // further intermediates: keep waiting for the final
                    self.intermediate = Some(Intermediate::Other(ch));
                    return ProcessorState::Esc;
                }
                (Intermediate::Designate(slot), _) => {
                    log::debug!("Ignore designation G{} {:?}", slot, ch);
                }
                (Intermediate::Other(first), _) => {
                    log::debug!("Ignore ESC {:?} {:?}", first, ch);
                }
            }
            return ProcessorState::Ready;
        }

        match ch {
            '(' => self.intermediate = Some(Intermediate::Designate(0)),
            ')' => self.intermediate = Some(Intermediate::Designate(1)),
            '*' => self.intermediate = Some(Intermediate::Designate(2)),
            '+' => self.intermediate = Some(Intermediate::Designate(3)),
            '\u{20}'..='\u{2F}' => self.intermediate = Some(Intermediate::Other(ch)),
            _ => return self.dispatch_final(ch, ctx),
        }
        ProcessorState::Esc
    }

    fn reset(&mut self) {
        self.intermediate = None;
    }
}

fn single_shift(slot: u8, ctx: &mut TerminalContext<'_>) {
    ctx.model
        .update(keys::GRAPHIC_CHARACTER_SET, |set| set.single_shift(slot));
}

/// RIS - Reset to Initial State
fn full_reset(ctx: &mut TerminalContext<'_>) {
    log::debug!("Full reset (RIS)");
    ctx.model.remove(keys::GRAPHIC_CHARACTER_SET);
    ctx.model.remove(keys::INSERT_MODE);
    ctx.model.remove(keys::CURSOR_VISIBLE);
    ctx.model.remove(keys::APPLICATION_KEYPAD);
    ctx.model.remove(keys::WINDOW_TITLE);
    ctx.model.remove(keys::ICON_TITLE);

    let palette = ctx.model.palette_mut();
    palette.reset_all_indexed();
    palette.reset_foreground();
    palette.reset_background();

    ctx.document.set_insert_mode(false);
}
