//! Deterministic snapshot generation
//!
//! Snapshots capture the interpreter's observable state in a serializable
//! format for testing and debugging. Given the same input, split into chunks
//! in any way, the terminal must produce identical snapshots.

use serde::{Deserialize, Serialize};

use crate::core::{keys, Clipboard, MemoryClipboard, PendingReplies, ReplySink, TextDocument};
use crate::parser::ProcessorState;
use crate::terminal::Terminal;

/// A complete snapshot of the terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Document width
    pub cols: usize,
    /// Document lines without trailing blanks
    pub lines: Vec<String>,
    /// Cursor state
    pub cursor: CursorSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,
    /// Terminal modes
    pub modes: ModesSnapshot,
    /// Default foreground / background as `#rrggbb`
    pub foreground: String,
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipboard: Option<String>,
    /// Replies emitted so far, lossily decoded
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<String>,
    /// State the next delivery starts in
    pub state: String,
}

/// Snapshot of cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub row: usize,
    pub col: usize,
    pub visible: bool,
}

/// Snapshot of terminal modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub application_keypad: bool,
    /// Charset currently invoked into GL
    pub charset: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}

fn state_name(state: ProcessorState) -> String {
    format!("{:?}", state)
}

impl Snapshot {
    /// Create a snapshot of a terminal writing to a [`TextDocument`]
    pub fn from_terminal<C, R>(term: &Terminal<TextDocument, C, R>) -> Self
    where
        C: Clipboard + SnapshotClipboard,
        R: ReplySink + SnapshotReplies,
    {
        let model = term.model();
        let document = term.document();
        let (row, col) = document.cursor();

        Self {
            cols: document.cols(),
            lines: document.lines(),
            cursor: CursorSnapshot {
                row,
                col,
                visible: model.get_or(keys::CURSOR_VISIBLE, true),
            },
            title: term.title().map(str::to_string),
            icon_title: term.icon_title().map(str::to_string),
            workdir: term.workdir().map(str::to_string),
            modes: ModesSnapshot {
                insert: term.insert_mode(),
                application_keypad: model.get_or(keys::APPLICATION_KEYPAD, false),
                charset: model
                    .get(keys::GRAPHIC_CHARACTER_SET)
                    .map(|set| format!("{:?}", set.current()))
                    .unwrap_or_else(|| "Ascii".to_string()),
            },
            foreground: hex_color(model.palette().foreground()),
            background: hex_color(model.palette().background()),
            clipboard: term.clipboard().snapshot_contents(),
            replies: term.replies().snapshot_replies(),
            state: state_name(term.state()),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get a simple text representation (for debugging)
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Cursor: ({}, {})\n", self.cursor.row, self.cursor.col));
        if let Some(title) = &self.title {
            out.push_str(&format!("Title: {}\n", title));
        }
        if let Some(icon_title) = &self.icon_title {
            out.push_str(&format!("Icon title: {}\n", icon_title));
        }
        if let Some(workdir) = &self.workdir {
            out.push_str(&format!("Workdir: {}\n", workdir));
        }
        if let Some(clipboard) = &self.clipboard {
            out.push_str(&format!("Clipboard: {:?}\n", clipboard));
        }
        for reply in &self.replies {
            out.push_str(&format!("Reply: {:?}\n", reply));
        }
        out.push_str(&format!("State: {}\n", self.state));
        out.push_str("---\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("---");
        out
    }
}

/// Clipboards whose contents can be captured in a snapshot
pub trait SnapshotClipboard {
    fn snapshot_contents(&self) -> Option<String>;
}

impl SnapshotClipboard for MemoryClipboard {
    fn snapshot_contents(&self) -> Option<String> {
        self.contents().map(str::to_string)
    }
}

/// The desktop clipboard is not read back
#[cfg(feature = "clipboard")]
impl SnapshotClipboard for crate::core::SystemClipboard {
    fn snapshot_contents(&self) -> Option<String> {
        None
    }
}

/// Reply sinks whose replies can be captured in a snapshot
pub trait SnapshotReplies {
    fn snapshot_replies(&self) -> Vec<String>;
}

impl SnapshotReplies for PendingReplies {
    fn snapshot_replies(&self) -> Vec<String> {
        self.pending()
            .iter()
            .map(|reply| String::from_utf8_lossy(reply).into_owned())
            .collect()
    }
}
