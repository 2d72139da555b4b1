//! CSI (Control Sequence Introducer) processor
//!
//! Collects `CSI [private] params [intermediates] final` across as many
//! deliveries as needed. Only the mode sequences that affect how text is
//! written are acted on:
//!
//! - `CSI 4 h` / `CSI 4 l`: IRM, insert/replace mode
//! - `CSI ? 25 h` / `CSI ? 25 l`: DECTCEM, cursor visibility
//!
//! Everything else is parsed completely and ignored.

use crate::core::{keys, ControlCharacters};

use super::dispatch::execute_control;
use super::state::{Processor, ProcessorState, TerminalContext};

/// Parameters kept per sequence; more switches to `Phase::Ignore`
const MAX_PARAMS: usize = 32;

/// Intermediates kept per sequence; more switches to `Phase::Ignore`
const MAX_INTERMEDIATES: usize = 2;

/// Where in the sequence the next byte lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    /// Right after the introducer; a private marker may follow
    #[default]
    Entry,
    Param,
    Intermediate,
    /// Malformed; consume up to the final byte
    Ignore,
}

/// Processor for CSI sequences
#[derive(Debug, Default)]
pub struct ControlSequenceProcessor {
    phase: Phase,
    private_marker: Option<char>,
    params: Vec<u32>,
    current_param: u32,
    param_has_digit: bool,
    intermediates: String,
}

impl ControlSequenceProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_param(&mut self) {
        self.params.push(self.current_param);
        self.current_param = 0;
        self.param_has_digit = false;
    }

    fn dispatch(&mut self, final_char: char, ctx: &mut TerminalContext<'_>) {
        if self.param_has_digit || !self.params.is_empty() {
            self.push_param();
        }

        match (self.private_marker, final_char, self.intermediates.is_empty()) {
            (None, 'h' | 'l', true) => {
                let enabled = final_char == 'h';
                for &mode in &self.params {
                    match mode {
                        4 => {
                            log::debug!("Insert mode: {}", enabled);
                            ctx.model.set(keys::INSERT_MODE, enabled);
                            ctx.document.set_insert_mode(enabled);
                        }
                        _ => log::debug!("Ignore ANSI mode {}", mode),
                    }
                }
            }
            (Some('?'), 'h' | 'l', true) => {
                let enabled = final_char == 'h';
                for &mode in &self.params {
                    match mode {
                        25 => {
                            log::debug!("Cursor visible: {}", enabled);
                            ctx.model.set(keys::CURSOR_VISIBLE, enabled);
                        }
                        _ => log::debug!("Ignore DEC private mode {}", mode),
                    }
                }
            }
            _ => {
                log::debug!(
                    "Ignore CSI {:?} {:?} {:?} {:?}",
                    self.private_marker,
                    self.params,
                    self.intermediates,
                    final_char
                );
            }
        }
    }
}

impl Processor for ControlSequenceProcessor {
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        match ch {
            ControlCharacters::ESC => {
                self.reset();
                return ProcessorState::Esc;
            }
            // CAN / SUB abort the sequence
            '\u{18}' | '\u{1A}' => {
                self.reset();
                return ProcessorState::Ready;
            }
            _ if ControlCharacters::is_executable(ch) => {
                execute_control(ch, ctx);
                return ProcessorState::Csi;
            }
            ControlCharacters::NUL | ControlCharacters::DEL => return ProcessorState::Csi,
            _ => {}
        }

        match (self.phase, ch) {
            (Phase::Ignore, '\u{40}'..='\u{7E}') => {
                log::debug!("Ignore malformed CSI ending in {:?}", ch);
                self.reset();
                return ProcessorState::Ready;
            }
            (Phase::Ignore, _) => {}
            (_, '\u{40}'..='\u{7E}') => {
                self.dispatch(ch, ctx);
                self.reset();
                return ProcessorState::Ready;
            }
            (Phase::Entry, '?' | '>' | '<' | '=') => {
                self.private_marker = Some(ch);
                self.phase = Phase::Param;
            }
            (Phase::Entry | Phase::Param, '0'..='9') => {
                let digit = ch as u32 - '0' as u32;
                self.current_param = self
                    .current_param
                    .saturating_mul(10)
                    .saturating_add(digit);
                self.param_has_digit = true;
                self.phase = Phase::Param;
            }
            (Phase::Entry | Phase::Param, ';' | ':') => {
                if self.params.len() >= MAX_PARAMS {
                    log::debug!("CSI with more than {} parameters", MAX_PARAMS);
                    self.phase = Phase::Ignore;
                } else {
                    self.push_param();
                    self.phase = Phase::Param;
                }
            }
            (_, '\u{20}'..='\u{2F}') => {
                if self.intermediates.len() >= MAX_INTERMEDIATES {
                    self.phase = Phase::Ignore;
                } else {
                    if self.param_has_digit {
                        self.push_param();
                    }
                    self.intermediates.push(ch);
                    self.phase = Phase::Intermediate;
                }
            }
            _ => {
                self.phase = Phase::Ignore;
            }
        }

        ProcessorState::Csi
    }

    fn reset(&mut self) {
        self.phase = Phase::Entry;
        self.private_marker = None;
        self.params.clear();
        self.current_param = 0;
        self.param_has_digit = false;
        self.intermediates.clear();
    }
}
