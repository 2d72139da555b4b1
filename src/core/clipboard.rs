//! Clipboard capability
//!
//! OSC 52 writes land in a [`Clipboard`]. [`MemoryClipboard`] keeps the
//! contents in-process; with the `clipboard` feature, [`SystemClipboard`]
//! forwards them to the desktop clipboard.

use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard not available")]
    Unavailable,
    #[error("clipboard backend error: {0}")]
    Backend(String),
}

/// Destination for clipboard writes requested by the remote side
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

/// In-process clipboard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, if anything was copied
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        self.contents = Some(text);
        Ok(())
    }
}

/// Desktop clipboard backed by `arboard`
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("available", &self.inner.is_some())
            .finish()
    }
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    /// Connect to the desktop clipboard; writes fail with
    /// [`ClipboardError::Unavailable`] if that is not possible
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("Clipboard not available: {}", e);
                None
            }
        };
        Self { inner }
    }
}

#[cfg(feature = "clipboard")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        let clipboard = self.inner.as_mut().ok_or(ClipboardError::Unavailable)?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Backend(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.set_text("copied".to_string()).unwrap();
        assert_eq!(clipboard.contents(), Some("copied"));

        clipboard.set_text(String::new()).unwrap();
        assert_eq!(clipboard.contents(), Some(""));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ClipboardError::Unavailable.to_string(), "clipboard not available");
        assert_eq!(
            ClipboardError::Backend("denied".into()).to_string(),
            "clipboard backend error: denied"
        );
    }
}
