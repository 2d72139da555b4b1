//! Terminal Core Module
//!
//! State shared by the interpreter's processors and the capabilities it
//! drives:
//! - Control character constants
//! - Typed model store and color palette
//! - Graphic character sets
//! - Document, clipboard and reply interfaces with in-memory implementations

mod charset;
mod clipboard;
mod color;
mod control;
mod document;
mod model;
mod reply;

pub use charset::{Charset, GraphicCharacterSet};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use color::{pack_rgb, unpack_rgb, ColorPalette, TerminalColor, DEFAULT_ANSI};
pub use control::ControlCharacters;
pub use document::{Document, TextDocument};
pub use model::{keys, DataKey, TerminalModel};
pub use reply::{PendingReplies, ReplySink};
