//! Termstream
//!
//! A streaming interpreter for terminal control streams. Decoded text is
//! delivered in chunks of any size; printable runs are written to a document
//! and escape sequences update a typed terminal model.
//!
//! - `core`: model store, palette, charsets, document/clipboard/reply interfaces
//! - `parser`: pushback reader, dispatcher and the per-family processors
//! - `terminal`: the [`Terminal`] owning all of the above
//! - `snapshot`: serializable view of a terminal for tests and tooling

pub mod config;
pub mod core;
pub mod parser;
pub mod snapshot;
pub mod terminal;

pub use config::{ConfigError, TerminalConfig};
pub use parser::ProcessorState;
pub use snapshot::Snapshot;
pub use terminal::Terminal;
