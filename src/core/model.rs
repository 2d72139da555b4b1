//! Terminal model store
//!
//! A per-terminal, strongly-typed key/value store. Processors publish their
//! side effects (titles, working directory, mode flags, the last written
//! text) here instead of knowing about every consumer.
//!
//! Keys carry their value type as a phantom parameter, so `set` and `get`
//! agree on the type at the call site while the storage itself is
//! type-erased.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::color::ColorPalette;

/// A typed, named handle into a [`TerminalModel`]
///
/// Keys are identified by name; the type parameter only fixes the value
/// type seen through this handle.
pub struct DataKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> DataKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for DataKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DataKey<T> {}

impl<T> PartialEq for DataKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for DataKey<T> {}

impl<T> fmt::Debug for DataKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DataKey").field(&self.name).finish()
    }
}

/// Well-known keys
pub mod keys {
    use super::DataKey;
    use crate::core::charset::GraphicCharacterSet;

    /// Window title (OSC 0 / OSC 2)
    pub const WINDOW_TITLE: DataKey<String> = DataKey::new("WindowTitle");
    /// Icon title (OSC 1)
    pub const ICON_TITLE: DataKey<String> = DataKey::new("IconTitle");
    /// Working directory reported by the shell (OSC 7)
    pub const WORKDIR: DataKey<String> = DataKey::new("Workdir");
    /// Designated character sets
    pub const GRAPHIC_CHARACTER_SET: DataKey<GraphicCharacterSet> =
        DataKey::new("GraphicCharacterSet");
    /// IRM - Insert/Replace mode
    pub const INSERT_MODE: DataKey<bool> = DataKey::new("InsertMode");
    /// Text of the most recent document write
    pub const WRITTEN: DataKey<String> = DataKey::new("Written");
    /// DECTCEM - cursor visibility
    pub const CURSOR_VISIBLE: DataKey<bool> = DataKey::new("CursorVisible");
    /// DECKPAM/DECKPNM - application keypad
    pub const APPLICATION_KEYPAD: DataKey<bool> = DataKey::new("ApplicationKeypad");
}

/// Per-terminal model: typed data entries plus the color palette
#[derive(Default)]
pub struct TerminalModel {
    data: HashMap<&'static str, Box<dyn Any>>,
    palette: ColorPalette,
}

impl fmt::Debug for TerminalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.data.keys().collect();
        names.sort_unstable();
        f.debug_struct("TerminalModel")
            .field("keys", &names)
            .field("palette", &self.palette)
            .finish()
    }
}

impl TerminalModel {
    pub fn new(palette: ColorPalette) -> Self {
        Self {
            data: HashMap::new(),
            palette,
        }
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set<T: Any>(&mut self, key: DataKey<T>, value: T) {
        self.data.insert(key.name, Box::new(value));
    }

    /// Value under `key`, or `None` if absent or stored with another type
    pub fn get<T: Any>(&self, key: DataKey<T>) -> Option<&T> {
        self.data.get(key.name)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: DataKey<T>) -> Option<&mut T> {
        self.data.get_mut(key.name)?.downcast_mut()
    }

    /// Value under `key`, or `default` when it is not set
    pub fn get_or<T: Any + Clone>(&self, key: DataKey<T>, default: T) -> T {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Apply `f` to the value under `key`, starting from `T::default()`
    /// when it is missing or was stored with another type
    pub fn update<T: Any + Default, R>(
        &mut self,
        key: DataKey<T>,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut value = self.remove(key).unwrap_or_default();
        let result = f(&mut value);
        self.set(key, value);
        result
    }

    pub fn contains<T: Any>(&self, key: DataKey<T>) -> bool {
        self.get(key).is_some()
    }

    /// Remove and return the value under `key`; a value stored with
    /// another type is left in place
    pub fn remove<T: Any>(&mut self, key: DataKey<T>) -> Option<T> {
        if !self.data.get(key.name)?.is::<T>() {
            return None;
        }
        let value = self.data.remove(key.name)?;
        value.downcast().ok().map(|boxed| *boxed)
    }

    /// Drop every data entry; the palette is kept
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut ColorPalette {
        &mut self.palette
    }
}
