//! Control characters
//!
//! Single-character sentinels used as sequence introducers, terminators
//! and text-run boundaries throughout the interpreter.

/// Named control characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlCharacters;

impl ControlCharacters {
    /// NUL - Null (ignored)
    pub const NUL: char = '\u{00}';
    /// BEL - Bell, also terminates OSC strings
    pub const BEL: char = '\u{07}';
    /// BS - Backspace
    pub const BS: char = '\u{08}';
    /// HT - Horizontal Tab
    pub const TAB: char = '\u{09}';
    /// LF - Line Feed
    pub const LF: char = '\u{0A}';
    /// VT - Vertical Tab
    pub const VT: char = '\u{0B}';
    /// FF - Form Feed
    pub const FF: char = '\u{0C}';
    /// CR - Carriage Return
    pub const CR: char = '\u{0D}';
    /// SO - Shift Out (select G1)
    pub const SO: char = '\u{0E}';
    /// SI - Shift In (select G0)
    pub const SI: char = '\u{0F}';
    /// ESC - Escape
    pub const ESC: char = '\u{1B}';
    /// DEL - Delete (ignored)
    pub const DEL: char = '\u{7F}';
    /// DCS - C1 Device Control String
    pub const DCS: char = '\u{90}';
    /// SOS - C1 Start of String
    pub const SOS: char = '\u{98}';
    /// CSI - C1 Control Sequence Introducer
    pub const CSI: char = '\u{9B}';
    /// ST - C1 String Terminator
    pub const ST: char = '\u{9C}';
    /// OSC - C1 Operating System Command
    pub const OSC: char = '\u{9D}';
    /// PM - C1 Privacy Message
    pub const PM: char = '\u{9E}';
    /// APC - C1 Application Program Command
    pub const APC: char = '\u{9F}';

    /// Characters that always end a plain-text run.
    pub const TEXT_TERMINATORS: [char; 8] = [
        Self::ESC,
        Self::BEL,
        Self::CR,
        Self::LF,
        Self::FF,
        Self::VT,
        Self::BS,
        Self::TAB,
    ];

    /// Check whether `ch` ends a plain-text run.
    ///
    /// Besides [`Self::TEXT_TERMINATORS`], every other control character
    /// except NUL ends the run too, so a run never carries a C0/C1 code
    /// into the document.
    pub fn is_text_terminator(ch: char) -> bool {
        Self::TEXT_TERMINATORS.contains(&ch) || (ch != Self::NUL && ch.is_control())
    }

    /// Check whether `ch` is executed by the dispatcher rather than printed
    pub fn is_executable(ch: char) -> bool {
        matches!(ch, '\u{01}'..='\u{1F}') && ch != Self::ESC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_terminators() {
        for ch in ControlCharacters::TEXT_TERMINATORS {
            assert!(ControlCharacters::is_text_terminator(ch));
        }
        assert!(ControlCharacters::is_text_terminator(ControlCharacters::SO));
        assert!(ControlCharacters::is_text_terminator(ControlCharacters::ST));
        assert!(!ControlCharacters::is_text_terminator(ControlCharacters::NUL));
        assert!(!ControlCharacters::is_text_terminator('a'));
        assert!(!ControlCharacters::is_text_terminator('世'));
    }

    #[test]
    fn test_executable() {
        assert!(ControlCharacters::is_executable(ControlCharacters::LF));
        assert!(ControlCharacters::is_executable(ControlCharacters::SI));
        assert!(!ControlCharacters::is_executable(ControlCharacters::ESC));
        assert!(!ControlCharacters::is_executable(ControlCharacters::NUL));
        assert!(!ControlCharacters::is_executable(ControlCharacters::DEL));
    }
}
