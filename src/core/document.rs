//! Document interface
//!
//! The interpreter never touches cell storage directly; it hands finished
//! text runs and executed control characters to a [`Document`].
//! [`TextDocument`] is a small in-memory implementation used by the
//! headless runner and the tests.

use unicode_width::UnicodeWidthChar;

use super::control::ControlCharacters;

/// Screen/document buffer written by the interpreter
pub trait Document {
    /// Write a run of already charset-mapped printable text at the cursor
    fn write(&mut self, text: &str);

    /// Execute a C0 control character (CR, LF, VT, FF, BS, TAB, BEL)
    fn control(&mut self, _control: char) {}

    /// IRM changed; following writes insert instead of overwrite
    fn set_insert_mode(&mut self, _enabled: bool) {}
}

/// Marks the second cell of a double-width character
const WIDE_SPACER: char = '\0';

/// Tab stop interval
const TAB_WIDTH: usize = 8;

/// In-memory document with a fixed width and unbounded height
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    cols: usize,
    lines: Vec<Vec<char>>,
    row: usize,
    col: usize,
    insert: bool,
    /// Every `write` call, in order, while `record_writes` is on
    writes: Vec<String>,
    record_writes: bool,
    /// Number of BEL characters executed
    bells: usize,
}

impl Default for TextDocument {
    fn default() -> Self {
        Self::new(80)
    }
}

impl TextDocument {
    /// Create an empty document `cols` cells wide (at least 1)
    pub fn new(cols: usize) -> Self {
        Self {
            cols: cols.max(1),
            lines: vec![Vec::new()],
            row: 0,
            col: 0,
            insert: false,
            writes: Vec::new(),
            record_writes: true,
            bells: 0,
        }
    }

    /// Turn recording of `write` calls on or off (on by default)
    ///
    /// The record grows with the input; long-running callers that only need
    /// the final text should turn it off.
    pub fn record_writes(mut self, enabled: bool) -> Self {
        self.record_writes = enabled;
        if !enabled {
            self.writes = Vec::new();
        }
        self
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn is_insert_mode(&self) -> bool {
        self.insert
    }

    /// Text runs passed to `write`, in order
    ///
    /// Meant for tests asserting how text was batched; empty when recording
    /// is off.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn bells(&self) -> usize {
        self.bells
    }

    /// Line content without trailing blanks
    pub fn line(&self, row: usize) -> String {
        self.lines
            .get(row)
            .map(|cells| {
                let text: String = cells.iter().filter(|&&c| c != WIDE_SPACER).collect();
                text.trim_end().to_string()
            })
            .unwrap_or_default()
    }

    /// All lines without trailing blanks
    pub fn lines(&self) -> Vec<String> {
        (0..self.lines.len()).map(|row| self.line(row)).collect()
    }

    /// Whole document as text, one line per row
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    fn current_line(&mut self) -> &mut Vec<char> {
        while self.lines.len() <= self.row {
            self.lines.push(Vec::new());
        }
        &mut self.lines[self.row]
    }

    fn put_char(&mut self, c: char) {
        let width = match c.width() {
            Some(width) if width > 0 => width.min(self.cols),
            // combining and zero-width characters are not stored
            _ => return,
        };

        if self.col + width > self.cols {
            self.row += 1;
            self.col = 0;
        }

        let col = self.col;
        let cols = self.cols;
        let insert = self.insert;
        let line = self.current_line();
        if line.len() < col {
            line.resize(col, ' ');
        }

        let cells = std::iter::once(c).chain(std::iter::repeat(WIDE_SPACER).take(width - 1));
        if insert {
            line.splice(col..col, cells);
            line.truncate(cols);
        } else {
            let end = (col + width).min(line.len());
            line.splice(col..end, cells);
        }

        self.col += width;
    }

    fn line_feed(&mut self) {
        self.row += 1;
        self.current_line();
    }
}

impl Document for TextDocument {
    fn write(&mut self, text: &str) {
        for c in text.chars() {
            self.put_char(c);
        }
        if self.record_writes {
            self.writes.push(text.to_string());
        }
    }

    fn control(&mut self, control: char) {
        match control {
            ControlCharacters::CR => self.col = 0,
            ControlCharacters::LF | ControlCharacters::VT | ControlCharacters::FF => {
                self.line_feed()
            }
            ControlCharacters::BS => self.col = self.col.saturating_sub(1),
            ControlCharacters::TAB => {
                let next = (self.col / TAB_WIDTH + 1) * TAB_WIDTH;
                self.col = next.min(self.cols - 1);
            }
            ControlCharacters::BEL => self.bells += 1,
            _ => {}
        }
    }

    fn set_insert_mode(&mut self, enabled: bool) {
        self.insert = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_newline() {
        let mut doc = TextDocument::new(20);
        doc.write("Hello");
        doc.control(ControlCharacters::CR);
        doc.control(ControlCharacters::LF);
        doc.write("World");

        assert_eq!(doc.lines(), vec!["Hello", "World"]);
        assert_eq!(doc.cursor(), (1, 5));
        assert_eq!(doc.writes(), ["Hello", "World"]);
    }

    #[test]
    fn test_recording_off() {
        let mut doc = TextDocument::new(20).record_writes(false);
        doc.write("Hello");
        doc.write(" World");

        assert!(doc.writes().is_empty());
        assert_eq!(doc.line(0), "Hello World");
    }

    #[test]
    fn test_overwrite_and_backspace() {
        let mut doc = TextDocument::new(20);
        doc.write("abc");
        doc.control(ControlCharacters::BS);
        doc.write("X");
        assert_eq!(doc.line(0), "abX");
    }

    #[test]
    fn test_insert_mode() {
        let mut doc = TextDocument::new(20);
        doc.write("abc");
        doc.control(ControlCharacters::CR);
        doc.set_insert_mode(true);
        doc.write("X");
        assert_eq!(doc.line(0), "Xabc");
        assert_eq!(doc.cursor(), (0, 1));
    }

    #[test]
    fn test_insert_truncates_at_width() {
        let mut doc = TextDocument::new(4);
        doc.write("abcd");
        doc.control(ControlCharacters::CR);
        doc.set_insert_mode(true);
        doc.write("X");
        assert_eq!(doc.line(0), "Xabc");
    }

    #[test]
    fn test_wrap() {
        let mut doc = TextDocument::new(4);
        doc.write("abcdef");
        assert_eq!(doc.lines(), vec!["abcd", "ef"]);
        assert_eq!(doc.cursor(), (1, 2));
    }

    #[test]
    fn test_wide_characters() {
        let mut doc = TextDocument::new(10);
        doc.write("世界!");
        assert_eq!(doc.line(0), "世界!");
        assert_eq!(doc.cursor(), (0, 5));
    }

    #[test]
    fn test_tab_and_bell() {
        let mut doc = TextDocument::new(20);
        doc.write("a");
        doc.control(ControlCharacters::TAB);
        doc.write("b");
        doc.control(ControlCharacters::BEL);

        assert_eq!(doc.line(0), "a       b");
        assert_eq!(doc.bells(), 1);
    }
}
