//! OSC (Operating System Command) processor
//!
//! Handles `ESC ] Ps ; Pt <terminator>`. The payload is accumulated across
//! as many deliveries as it takes, then dispatched by the numeric `Ps`:
//!
//! - 0, 2: window title
//! - 1: icon title
//! - 4: query/set palette entries
//! - 7: working directory
//! - 8: hyperlink (recognized, ignored)
//! - 10, 11: query/set default foreground/background
//! - 52: clipboard write (base64)
//! - 104, 110, 111: reset palette / foreground / background
//!
//! Reference: <https://invisible-island.net/xterm/ctlseqs/ctlseqs.html#h3-Operating-System-Commands>

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::config::TerminalConfig;
use crate::core::{keys, unpack_rgb, ColorPalette, ControlCharacters};

use super::sequence::SystemCommandSequence;
use super::state::{Processor, ProcessorState, TerminalContext};

/// Clipboard payloads are accepted with or without `=` padding
const SELECTION_DATA: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Room for `52;<targets>;` ahead of the clipboard data
const SELECTION_PREFIX_MAX: usize = 16;

/// Characters the accumulator keeps: enough for the largest accepted
/// clipboard write, or the generic limit if that is larger
fn accumulator_limit(config: &TerminalConfig) -> usize {
    config
        .osc_max_length
        .max(config.osc52_max_size.saturating_add(SELECTION_PREFIX_MAX))
}

/// Processor for OSC strings
#[derive(Debug, Default)]
pub struct OperatingSystemCommandProcessor {
    sequence: SystemCommandSequence,
}

impl OperatingSystemCommandProcessor {
    pub fn new(max_len: usize) -> Self {
        Self {
            sequence: SystemCommandSequence::new(max_len),
        }
    }

    /// Dispatch the completed payload
    fn dispatch(&self, ctx: &mut TerminalContext<'_>) {
        if self.sequence.is_overflowed() {
            log::warn!(
                "OSC payload longer than {} characters discarded",
                accumulator_limit(ctx.config)
            );
            return;
        }

        let args = self.sequence.get_command();
        let Some((prefix, suffix)) = args.split_once(';') else {
            log::debug!("OSC without parameters ignored: {:?}", args);
            return;
        };

        // clipboard writes are bounded by osc52_max_size instead
        if prefix != "52" && self.sequence.len() > ctx.config.osc_max_length {
            log::warn!(
                "OSC {} payload longer than {} characters discarded",
                prefix,
                ctx.config.osc_max_length
            );
            return;
        }

        match prefix.parse::<u16>() {
            // window title
            Ok(0 | 2) => {
                log::debug!("Window Title: {}", suffix);
                ctx.model.set(keys::WINDOW_TITLE, suffix.to_string());
            }
            // icon title
            Ok(1) => {
                log::debug!("Icon Title: {}", suffix);
                ctx.model.set(keys::ICON_TITLE, suffix.to_string());
            }
            Ok(4) => set_palette_colors(suffix, ctx),
            // workdir
            Ok(7) => {
                log::debug!("Workdir: {}", suffix);
                ctx.model.set(keys::WORKDIR, suffix.to_string());
            }
            // hyperlink https://gist.github.com/egmontkob/eb114294efbcd5adb1944c9f3cb5feda
            Ok(8) => {
                log::debug!("Ignore hyperlink OSC: 8");
            }
            Ok(mode @ (10 | 11)) => dynamic_color(mode, suffix, ctx),
            Ok(52) => manipulate_selection_data(suffix, ctx),
            Ok(104) => reset_palette_colors(suffix, ctx),
            Ok(110) => ctx.model.palette_mut().reset_foreground(),
            Ok(111) => ctx.model.palette_mut().reset_background(),
            _ => {
                log::warn!("Unknown OSC: {}", prefix);
            }
        }
    }
}

impl Processor for OperatingSystemCommandProcessor {
    fn process(&mut self, ch: char, ctx: &mut TerminalContext<'_>) -> ProcessorState {
        self.sequence.set_max_len(accumulator_limit(ctx.config));

        // hand the character back and re-read it together with whatever follows
        ctx.reader.add_first(ch);

        loop {
            let Some(next) = ctx.reader.read() else {
                return ProcessorState::Osc;
            };
            if self.sequence.process(next) {
                break;
            }
            if ctx.reader.is_empty() {
                return ProcessorState::Osc;
            }
        }

        self.dispatch(ctx);

        let state = match self.sequence.interrupted_by() {
            // ESC ended the string and starts a new escape sequence
            Some(interrupt) => {
                ctx.reader.add_first(interrupt);
                ProcessorState::Esc
            }
            None => ProcessorState::Ready,
        };

        self.sequence.reset();
        state
    }

    fn reset(&mut self) {
        self.sequence.reset();
    }
}

/// Format a color reply: `ESC ] <prefix> ; rgb:RRRR/GGGG/BBBB BEL`
///
/// Each 8-bit channel is scaled to 16 bits by repeating the byte.
pub fn color_reply(prefix: &str, color: u32) -> String {
    let (r, g, b) = unpack_rgb(color);
    format!(
        "{}]{};rgb:{:04x}/{:04x}/{:04x}{}",
        ControlCharacters::ESC,
        prefix,
        u32::from(r) * 0x101,
        u32::from(g) * 0x101,
        u32::from(b) * 0x101,
        ControlCharacters::BEL
    )
}

fn emit_color_reply(prefix: &str, color: u32, ctx: &mut TerminalContext<'_>) {
    let reply = color_reply(prefix, color);
    log::debug!("OSC reply color: {:?}", reply);
    if ctx.config.color_query_replies {
        ctx.replies.emit_reply(reply.as_bytes());
    }
}

/// OSC 10 / OSC 11: query or set the default foreground / background
///
/// A valid color spec sets the color; anything else is answered with the
/// current color, which defaults to the white / black palette slot.
fn dynamic_color(mode: u16, spec: &str, ctx: &mut TerminalContext<'_>) {
    let palette = ctx.model.palette_mut();
    match ColorPalette::parse_color_spec(spec) {
        Some(color) if mode == 10 => palette.set_foreground(color),
        Some(color) => palette.set_background(color),
        None => {
            if spec != "?" {
                log::debug!("OSC {}: answering unparsed color spec {:?}", mode, spec);
            }
            let color = if mode == 10 {
                palette.foreground()
            } else {
                palette.background()
            };
            emit_color_reply(&mode.to_string(), color, ctx);
        }
    }
}

/// OSC 4 ; index ; spec [; index ; spec ...]
fn set_palette_colors(args: &str, ctx: &mut TerminalContext<'_>) {
    let mut parts = args.split(';');
    while let (Some(index), Some(spec)) = (parts.next(), parts.next()) {
        let Ok(index) = index.parse::<u8>() else {
            log::warn!("OSC 4: invalid color index {:?}", index);
            return;
        };

        if spec == "?" {
            let color = ctx.model.palette().get_indexed(index);
            emit_color_reply(&format!("4;{}", index), color, ctx);
        } else if let Some(color) = ColorPalette::parse_color_spec(spec) {
            ctx.model.palette_mut().set_indexed(index, color);
        } else {
            log::warn!("OSC 4: invalid color spec {:?}", spec);
        }
    }
}

/// OSC 104 [; index ...]: reset the listed palette entries, or all of them
fn reset_palette_colors(args: &str, ctx: &mut TerminalContext<'_>) {
    let palette = ctx.model.palette_mut();
    if args.is_empty() {
        palette.reset_all_indexed();
        return;
    }
    for index in args.split(';') {
        match index.parse::<u8>() {
            Ok(index) => palette.reset_indexed(index),
            Err(_) => log::warn!("OSC 104: invalid color index {:?}", index),
        }
    }
}

/// OSC 52 ; target ; data: Manipulate Selection Data
fn manipulate_selection_data(args: &str, ctx: &mut TerminalContext<'_>) {
    let (target, data) = args.split_once(';').unwrap_or((args, ""));

    if target != "c" {
        log::warn!("Manipulate Selection Data. Unknown: ({}, {})", target, data);
        return;
    }

    if !ctx.config.osc52_clipboard {
        log::warn!("OSC 52 clipboard request blocked (disabled in config)");
        return;
    }

    if data == "?" {
        log::debug!("OSC 52 clipboard query not supported");
        return;
    }

    if data.len() > ctx.config.osc52_max_size {
        log::warn!(
            "OSC 52 clipboard request blocked: payload size {} exceeds limit {}",
            data.len(),
            ctx.config.osc52_max_size
        );
        return;
    }

    let decoded = match SELECTION_DATA.decode(data) {
        Ok(decoded) => decoded,
        Err(e) => {
            log::warn!("OSC 52 clipboard: invalid base64 data: {}", e);
            return;
        }
    };

    let text = String::from_utf8_lossy(&decoded).into_owned();
    log::debug!("Copy {} characters to clipboard", text.chars().count());
    if let Err(e) = ctx.clipboard.set_text(text) {
        log::warn!("OSC 52 clipboard: failed to set clipboard: {}", e);
    }
}
