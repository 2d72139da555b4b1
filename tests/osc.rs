//! OSC integration tests
//!
//! Titles, working directory, clipboard writes and color queries as seen
//! through the public `Terminal` API.

use termstream::core::{Clipboard, ClipboardError, PendingReplies, ReplySink, TextDocument};
use termstream::{ProcessorState, Terminal, TerminalConfig};

fn terminal() -> Terminal<TextDocument> {
    Terminal::new(TextDocument::new(80))
}

fn replies(term: &mut Terminal<TextDocument>) -> Vec<String> {
    term.replies_mut()
        .take()
        .into_iter()
        .map(|reply| String::from_utf8(reply).unwrap())
        .collect()
}

/// Clipboard that refuses every write
#[derive(Debug, Default)]
struct BrokenClipboard {
    attempts: usize,
}

impl Clipboard for BrokenClipboard {
    fn set_text(&mut self, _text: String) -> Result<(), ClipboardError> {
        self.attempts += 1;
        Err(ClipboardError::Unavailable)
    }
}

/// Reply sink standing in for the pty
#[derive(Debug, Default)]
struct PtyWriter {
    written: Vec<u8>,
}

impl ReplySink for PtyWriter {
    fn emit_reply(&mut self, bytes: &[u8]) {
        self.written.extend_from_slice(bytes);
    }
}

// ============================================================================
// Titles and working directory
// ============================================================================

#[test]
fn test_window_title() {
    let mut term = terminal();
    term.write("\x1b]0;hello\x07");

    assert_eq!(term.title(), Some("hello"));
    assert_eq!(term.state(), ProcessorState::Ready);
}

#[test]
fn test_title_modes() {
    let mut term = terminal();
    term.write("\x1b]2;window\x07\x1b]1;icon\x07");

    assert_eq!(term.title(), Some("window"));
    assert_eq!(term.icon_title(), Some("icon"));
}

#[test]
fn test_st_terminators() {
    let mut term = terminal();
    term.write("\x1b]0;esc-backslash\x1b\\after");
    assert_eq!(term.title(), Some("esc-backslash"));
    assert_eq!(term.document().text(), "after");

    term.write("\x1b]0;c1\u{9c}");
    assert_eq!(term.title(), Some("c1"));
}

#[test]
fn test_c1_introducer() {
    let mut term = terminal();
    term.write("\u{9d}7;file:///srv\x07");

    assert_eq!(term.workdir(), Some("file:///srv"));
}

#[test]
fn test_split_delivery_is_lossless() {
    let mut split = terminal();
    split.write("\x1b]0;");
    assert_eq!(split.state(), ProcessorState::Osc);
    assert_eq!(split.title(), None);
    split.write("hello\x07");

    let mut whole = terminal();
    whole.write("\x1b]0;hello\x07");

    assert_eq!(split.title(), whole.title());
    assert_eq!(split.title(), Some("hello"));
}

#[test]
fn test_unicode_title() {
    let mut term = terminal();
    term.write("\x1b]2;日本語 ✓\x07");

    assert_eq!(term.title(), Some("日本語 ✓"));
}

#[test]
fn test_unknown_mode_leaves_model_untouched() {
    let mut term = terminal();
    term.write("\x1b]99;foo\x07");

    assert_eq!(term.title(), None);
    assert_eq!(term.state(), ProcessorState::Ready);

    term.write("\x1b]0;next\x07");
    assert_eq!(term.title(), Some("next"));
}

#[test]
fn test_hyperlink_ignored() {
    let mut term = terminal();
    term.write("\x1b]8;;https://example.com\x07link\x1b]8;;\x07");

    assert_eq!(term.document().text(), "link");
    assert_eq!(term.title(), None);
}

#[test]
fn test_interrupted_by_csi() {
    let mut term = terminal();
    term.write("\x1b]0;cut short\x1b[4hx");

    assert_eq!(term.title(), Some("cut short"));
    assert!(term.insert_mode());
    assert_eq!(term.document().text(), "x");
}

#[test]
fn test_oversize_payload_discarded() {
    let config = TerminalConfig {
        osc_max_length: 16,
        ..TerminalConfig::default()
    };
    let mut term = Terminal::with_config(TextDocument::new(80), config);

    term.write(&format!("\x1b]0;{}\x07", "x".repeat(100)));
    assert_eq!(term.title(), None);
    assert_eq!(term.state(), ProcessorState::Ready);

    term.write("\x1b]0;short\x07");
    assert_eq!(term.title(), Some("short"));
}

// ============================================================================
// Clipboard (OSC 52)
// ============================================================================

#[test]
fn test_clipboard_write() {
    let mut term = terminal();
    term.write("\x1b]52;c;Y29waWVkLXRleHQ=\x07");

    assert_eq!(term.clipboard().contents(), Some("copied-text"));
}

#[test]
fn test_clipboard_write_unpadded() {
    let mut term = terminal();
    term.write("\x1b]52;c;Y29waWVkLXRleHQ\x07");

    assert_eq!(term.clipboard().contents(), Some("copied-text"));
}

#[test]
fn test_large_clipboard_write_with_default_config() {
    let config = TerminalConfig::default();
    let data = "YWJj".repeat(20_000);
    assert!(data.len() > config.osc_max_length);
    assert!(data.len() < config.osc52_max_size);

    let mut term = terminal();
    term.write(&format!("\x1b]52;c;{}\x07", data));

    let contents = term.clipboard().contents().map(str::len);
    assert_eq!(contents, Some(60_000));
}

#[test]
fn test_clipboard_disabled() {
    let config = TerminalConfig {
        osc52_clipboard: false,
        ..TerminalConfig::default()
    };
    let mut term = Terminal::with_config(TextDocument::new(80), config);
    term.write("\x1b]52;c;Y29waWVkLXRleHQ=\x07");

    assert_eq!(term.clipboard().contents(), None);
}

#[test]
fn test_clipboard_failure_is_swallowed() {
    let mut term = Terminal::with_capabilities(
        TextDocument::new(80),
        BrokenClipboard::default(),
        PendingReplies::new(),
        TerminalConfig::default(),
    );
    term.write("\x1b]52;c;aGk=\x07after");

    assert_eq!(term.clipboard().attempts, 1);
    assert_eq!(term.document().text(), "after");
}

// ============================================================================
// Color queries
// ============================================================================

#[test]
fn test_default_color_queries() {
    let mut term = terminal();
    term.write("\x1b]10;?\x07\x1b]11;?\x07");

    assert_eq!(
        replies(&mut term),
        [
            "\x1b]10;rgb:e5e5/e5e5/e5e5\x07",
            "\x1b]11;rgb:0000/0000/0000\x07",
        ]
    );
}

#[test]
fn test_color_query_channel_scaling() {
    let mut term = terminal();
    term.write("\x1b]4;7;#3366cc\x07\x1b]10;?\x07");

    assert_eq!(replies(&mut term), ["\x1b]10;rgb:3333/6666/cccc\x07"]);
}

#[test]
fn test_set_and_reset_dynamic_colors() {
    let mut term = terminal();
    term.write("\x1b]10;rgb:12/34/56\x07\x1b]10;?\x07");
    assert_eq!(replies(&mut term), ["\x1b]10;rgb:1212/3434/5656\x07"]);

    term.write("\x1b]110;\x07\x1b]10;?\x07");
    assert_eq!(replies(&mut term), ["\x1b]10;rgb:e5e5/e5e5/e5e5\x07"]);
}

#[test]
fn test_palette_query() {
    let mut term = terminal();
    term.write("\x1b]4;196;?\x07");

    assert_eq!(replies(&mut term), ["\x1b]4;196;rgb:ffff/0000/0000\x07"]);
}

#[test]
fn test_replies_reach_custom_sink() {
    let mut term = Terminal::with_capabilities(
        TextDocument::new(80),
        termstream::core::MemoryClipboard::new(),
        PtyWriter::default(),
        TerminalConfig::default(),
    );
    term.write("\x1b]11;?\x1b\\");

    assert_eq!(term.replies().written, b"\x1b]11;rgb:0000/0000/0000\x07");
}

#[test]
fn test_replies_disabled() {
    let config = TerminalConfig {
        color_query_replies: false,
        ..TerminalConfig::default()
    };
    let mut term = Terminal::with_config(TextDocument::new(80), config);
    term.write("\x1b]10;?\x07\x1b]4;1;?\x07");

    assert!(term.replies().is_empty());
}
