//! Configuration for the interpreter

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{pack_rgb, ColorPalette};

/// Interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Allow OSC 52 to write the clipboard
    pub osc52_clipboard: bool,
    /// Largest accepted OSC 52 payload (base64 characters)
    pub osc52_max_size: usize,
    /// Answer OSC 4/10/11 color queries
    pub color_query_replies: bool,
    /// Longest OSC payload kept; longer sequences are discarded
    pub osc_max_length: usize,
    /// Initial color palette
    pub colors: PaletteConfig,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            osc52_clipboard: true,
            osc52_max_size: 1024 * 1024,
            color_query_replies: true,
            osc_max_length: 64 * 1024,
            colors: PaletteConfig::default(),
        }
    }
}

/// Color palette configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Default foreground color; `None` uses ANSI white
    pub foreground: Option<(u8, u8, u8)>,
    /// Default background color; `None` uses ANSI black
    pub background: Option<(u8, u8, u8)>,
    /// The 16 ANSI colors (0-15)
    pub ansi: [(u8, u8, u8); 16],
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            foreground: None,
            background: None,
            // Default ANSI colors (similar to xterm)
            ansi: [
                (0, 0, 0),       // 0: Black
                (205, 0, 0),     // 1: Red
                (0, 205, 0),     // 2: Green
                (205, 205, 0),   // 3: Yellow
                (0, 0, 238),     // 4: Blue
                (205, 0, 205),   // 5: Magenta
                (0, 205, 205),   // 6: Cyan
                (229, 229, 229), // 7: White
                (127, 127, 127), // 8: Bright Black
                (255, 0, 0),     // 9: Bright Red
                (0, 255, 0),     // 10: Bright Green
                (255, 255, 0),   // 11: Bright Yellow
                (92, 92, 255),   // 12: Bright Blue
                (255, 0, 255),   // 13: Bright Magenta
                (0, 255, 255),   // 14: Bright Cyan
                (255, 255, 255), // 15: Bright White
            ],
        }
    }
}

impl PaletteConfig {
    /// Build the palette a new terminal starts with
    pub fn to_palette(&self) -> ColorPalette {
        let ansi = self.ansi.map(|(r, g, b)| pack_rgb(r, g, b));
        ColorPalette::new(ansi).with_default_colors(
            self.foreground.map(|(r, g, b)| pack_rgb(r, g, b)),
            self.background.map(|(r, g, b)| pack_rgb(r, g, b)),
        )
    }
}

impl TerminalConfig {
    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from default location or return default config
    pub fn load_or_default() -> Self {
        // Try to load from ~/.config/termstream/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
                }
            }
        }
        Self::default()
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("termstream"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
