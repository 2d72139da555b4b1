//! Terminal
//!
//! Owns the reader, the dispatcher, the model and the capabilities the
//! processors drive. This is the main integration point: callers deliver
//! decoded chunks with [`Terminal::write`] and read the resulting state back
//! from the model and the document.

use crate::config::TerminalConfig;
use crate::core::{
    keys, Clipboard, Document, MemoryClipboard, PendingReplies, ReplySink, TerminalModel,
};
use crate::parser::{Dispatcher, ProcessorState, TerminalContext, TerminalReader};

/// A streaming terminal interpreter
pub struct Terminal<D: Document, C: Clipboard = MemoryClipboard, R: ReplySink = PendingReplies> {
    reader: TerminalReader,
    dispatcher: Dispatcher,
    model: TerminalModel,
    document: D,
    clipboard: C,
    replies: R,
    config: TerminalConfig,
}

impl<D: Document> Terminal<D> {
    /// Create a terminal with the default configuration, an in-memory
    /// clipboard and queued replies
    pub fn new(document: D) -> Self {
        Self::with_config(document, TerminalConfig::default())
    }

    pub fn with_config(document: D, config: TerminalConfig) -> Self {
        Self::with_capabilities(document, MemoryClipboard::new(), PendingReplies::new(), config)
    }
}

impl<D: Document, C: Clipboard, R: ReplySink> Terminal<D, C, R> {
    /// Create a terminal driving the given capabilities
    pub fn with_capabilities(document: D, clipboard: C, replies: R, config: TerminalConfig) -> Self {
        Self {
            reader: TerminalReader::new(),
            dispatcher: Dispatcher::new(),
            model: TerminalModel::new(config.colors.to_palette()),
            document,
            clipboard,
            replies,
            config,
        }
    }

    /// Deliver a chunk and process everything available
    ///
    /// A sequence cut off at the end of the chunk is kept and completed by
    /// later deliveries.
    pub fn write(&mut self, data: &str) {
        self.reader.feed(data);
        let mut ctx = TerminalContext {
            reader: &mut self.reader,
            model: &mut self.model,
            document: &mut self.document,
            clipboard: &mut self.clipboard,
            replies: &mut self.replies,
            config: &self.config,
        };
        self.dispatcher.run(&mut ctx);
    }

    /// State the next delivery starts in
    pub fn state(&self) -> ProcessorState {
        self.dispatcher.state()
    }

    pub fn model(&self) -> &TerminalModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut TerminalModel {
        &mut self.model
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn replies(&self) -> &R {
        &self.replies
    }

    pub fn replies_mut(&mut self) -> &mut R {
        &mut self.replies
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Window title set by OSC 0 / OSC 2
    pub fn title(&self) -> Option<&str> {
        self.model.get(keys::WINDOW_TITLE).map(String::as_str)
    }

    /// Icon title set by OSC 1
    pub fn icon_title(&self) -> Option<&str> {
        self.model.get(keys::ICON_TITLE).map(String::as_str)
    }

    /// Working directory reported through OSC 7
    pub fn workdir(&self) -> Option<&str> {
        self.model.get(keys::WORKDIR).map(String::as_str)
    }

    pub fn insert_mode(&self) -> bool {
        self.model.get_or(keys::INSERT_MODE, false)
    }

    /// Drop undelivered input and any partial sequence; the model and
    /// document are left as they are
    pub fn reset(&mut self) {
        self.reader.clear();
        self.dispatcher.reset();
    }
}

impl<D, C, R> std::fmt::Debug for Terminal<D, C, R>
where
    D: Document + std::fmt::Debug,
    C: Clipboard + std::fmt::Debug,
    R: ReplySink + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("state", &self.state())
            .field("model", &self.model)
            .field("document", &self.document)
            .field("clipboard", &self.clipboard)
            .field("replies", &self.replies)
            .finish()
    }
}
