//! Graphic character sets
//!
//! Tracks the G0-G3 designations and which one is invoked into GL, and
//! remaps printable characters through it before they reach the document.
//! Supports DEC Special Graphics (line drawing) and the UK national set.

use serde::{Deserialize, Serialize};

/// Character set designations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Charset {
    /// ASCII (US) - default
    #[default]
    Ascii,
    /// DEC Special Graphics (line drawing characters)
    DecSpecialGraphics,
    /// UK character set
    Uk,
}

impl Charset {
    /// Parse the final character of an `ESC ( F` style designation
    pub fn from_designation(final_char: char) -> Self {
        match final_char {
            '0' | '2' => Charset::DecSpecialGraphics,
            'A' => Charset::Uk,
            // 'B', '@' and anything unknown
            _ => Charset::Ascii,
        }
    }

    /// Translate a character through this charset
    pub fn translate(self, c: char) -> char {
        match self {
            Charset::Ascii => c,
            Charset::DecSpecialGraphics => translate_dec_special_graphics(c),
            Charset::Uk => translate_uk(c),
        }
    }
}

/// The designated character sets and the current GL selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphicCharacterSet {
    slots: [Charset; 4],
    /// Slot invoked into GL (0 = G0 after SI, 1 = G1 after SO)
    active: u8,
    /// Pending single shift (2 or 3), applies to the next character only
    single_shift: Option<u8>,
}

impl GraphicCharacterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate `charset` into slot G`slot` (0-3); other slots are ignored
    pub fn designate(&mut self, slot: u8, charset: Charset) {
        if let Some(entry) = self.slots.get_mut(slot as usize) {
            *entry = charset;
        }
    }

    /// Charset designated into slot G`slot`
    pub fn slot(&self, slot: u8) -> Charset {
        self.slots.get(slot as usize).copied().unwrap_or_default()
    }

    /// Shift In (SI) - invoke G0 into GL
    pub fn shift_in(&mut self) {
        self.active = 0;
        self.single_shift = None;
    }

    /// Shift Out (SO) - invoke G1 into GL
    pub fn shift_out(&mut self) {
        self.active = 1;
        self.single_shift = None;
    }

    /// SS2 / SS3 - use G2 or G3 for the next character only
    pub fn single_shift(&mut self, slot: u8) {
        if matches!(slot, 2 | 3) {
            self.single_shift = Some(slot);
        }
    }

    /// The charset the next character will be mapped through
    pub fn current(&self) -> Charset {
        self.slot(self.single_shift.unwrap_or(self.active))
    }

    /// Map a character through the current charset, consuming any single shift
    pub fn map(&mut self, c: char) -> char {
        let charset = self.current();
        self.single_shift = None;
        charset.translate(c)
    }
}

/// Translate DEC Special Graphics characters
/// Maps ASCII 0x60-0x7E to line drawing and other special characters
fn translate_dec_special_graphics(c: char) -> char {
    match c {
        '`' => '◆',
        'a' => '▒',
        'b' => '␉',
        'c' => '␌',
        'd' => '␍',
        'e' => '␊',
        'f' => '°',
        'g' => '±',
        'h' => '␤',
        'i' => '␋',
        'j' => '┘',
        'k' => '┐',
        'l' => '┌',
        'm' => '└',
        'n' => '┼',
        'o' => '⎺',
        'p' => '⎻',
        'q' => '─',
        'r' => '⎼',
        's' => '⎽',
        't' => '├',
        'u' => '┤',
        'v' => '┴',
        'w' => '┬',
        'x' => '│',
        'y' => '≤',
        'z' => '≥',
        '{' => 'π',
        '|' => '≠',
        '}' => '£',
        '~' => '·',
        _ => c,
    }
}

/// Translate UK character set (only # differs)
fn translate_uk(c: char) -> char {
    match c {
        '#' => '£',
        _ => c,
    }
}
