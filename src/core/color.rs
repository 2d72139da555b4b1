//! Terminal color palette
//!
//! Supports:
//! - Named 16-color palette (standard ANSI colors)
//! - 256-color indexed palette
//! - Dynamic default foreground/background (OSC 10/11)
//!
//! Colors are stored packed as `0xRRGGBB`.

use serde::{Deserialize, Serialize};

/// Named colors from the standard 16-color ANSI palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerminalColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl TerminalColor {
    /// Get the index in the 256-color palette
    pub fn to_index(self) -> u8 {
        self as u8
    }
}

/// Pack 8-bit channels into `0xRRGGBB`
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split `0xRRGGBB` into 8-bit channels
pub const fn unpack_rgb(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Default xterm colors for the 16 named slots
pub const DEFAULT_ANSI: [u32; 16] = [
    pack_rgb(0, 0, 0),       // Black
    pack_rgb(205, 0, 0),     // Red
    pack_rgb(0, 205, 0),     // Green
    pack_rgb(205, 205, 0),   // Yellow
    pack_rgb(0, 0, 238),     // Blue
    pack_rgb(205, 0, 205),   // Magenta
    pack_rgb(0, 205, 205),   // Cyan
    pack_rgb(229, 229, 229), // White
    pack_rgb(127, 127, 127), // Bright Black
    pack_rgb(255, 0, 0),     // Bright Red
    pack_rgb(0, 255, 0),     // Bright Green
    pack_rgb(255, 255, 0),   // Bright Yellow
    pack_rgb(92, 92, 255),   // Bright Blue
    pack_rgb(255, 0, 255),   // Bright Magenta
    pack_rgb(0, 255, 255),   // Bright Cyan
    pack_rgb(255, 255, 255), // Bright White
];

/// The 256-color palette plus the dynamic default colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    /// Colors the palette was created with, restored by the reset operations
    initial: [u32; 256],
    colors: [u32; 256],
    initial_foreground: Option<u32>,
    initial_background: Option<u32>,
    foreground: Option<u32>,
    background: Option<u32>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(DEFAULT_ANSI)
    }
}

impl ColorPalette {
    /// Create a palette from the 16 ANSI colors; the color cube and the
    /// grayscale ramp are always the xterm defaults.
    pub fn new(ansi: [u32; 16]) -> Self {
        let mut colors = [0u32; 256];
        colors[..16].copy_from_slice(&ansi);

        // 6x6x6 color cube (16-231)
        let to_component = |c: usize| if c == 0 { 0 } else { (55 + c * 40) as u8 };
        for r in 0..6 {
            for g in 0..6 {
                for b in 0..6 {
                    colors[16 + r * 36 + g * 6 + b] =
                        pack_rgb(to_component(r), to_component(g), to_component(b));
                }
            }
        }

        // Grayscale ramp (232-255)
        for i in 0..24 {
            let gray = (8 + i * 10) as u8;
            colors[232 + i] = pack_rgb(gray, gray, gray);
        }

        Self {
            initial: colors,
            colors,
            initial_foreground: None,
            initial_background: None,
            foreground: None,
            background: None,
        }
    }

    /// Use `foreground` / `background` as the default colors instead of
    /// ANSI white and black; the reset operations restore these
    pub fn with_default_colors(
        mut self,
        foreground: Option<u32>,
        background: Option<u32>,
    ) -> Self {
        self.initial_foreground = foreground.map(|c| c & 0xFF_FFFF);
        self.initial_background = background.map(|c| c & 0xFF_FFFF);
        self.foreground = self.initial_foreground;
        self.background = self.initial_background;
        self
    }

    /// Packed RGB for a named slot
    pub fn get_color(&self, color: TerminalColor) -> u32 {
        self.get_indexed(color.to_index())
    }

    /// Packed RGB for an indexed color (0-255)
    pub fn get_indexed(&self, index: u8) -> u32 {
        self.colors[index as usize]
    }

    pub fn set_indexed(&mut self, index: u8, color: u32) {
        self.colors[index as usize] = color & 0xFF_FFFF;
    }

    /// Restore an indexed color to its initial value
    pub fn reset_indexed(&mut self, index: u8) {
        self.colors[index as usize] = self.initial[index as usize];
    }

    /// Restore every indexed color
    pub fn reset_all_indexed(&mut self) {
        self.colors = self.initial;
    }

    /// Default foreground: the dynamic or configured color if set,
    /// otherwise ANSI white
    pub fn foreground(&self) -> u32 {
        self.foreground
            .unwrap_or_else(|| self.get_color(TerminalColor::White))
    }

    /// Default background: the dynamic or configured color if set,
    /// otherwise ANSI black
    pub fn background(&self) -> u32 {
        self.background
            .unwrap_or_else(|| self.get_color(TerminalColor::Black))
    }

    pub fn set_foreground(&mut self, color: u32) {
        self.foreground = Some(color & 0xFF_FFFF);
    }

    pub fn set_background(&mut self, color: u32) {
        self.background = Some(color & 0xFF_FFFF);
    }

    pub fn reset_foreground(&mut self) {
        self.foreground = self.initial_foreground;
    }

    pub fn reset_background(&mut self) {
        self.background = self.initial_background;
    }

    /// Parse a color specification like "#RRGGBB" or "rgb:RR/GG/BB".
    ///
    /// `rgb:` channels take 1 to 4 hex digits and are scaled to 8 bits.
    pub fn parse_color_spec(spec: &str) -> Option<u32> {
        let spec = spec.trim();

        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                return Some(pack_rgb(r, g, b));
            }
            return None;
        }

        let rgb = spec
            .strip_prefix("rgb:")
            .or_else(|| spec.strip_prefix("RGB:"))?;
        let mut channels = rgb.split('/').map(parse_channel);
        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;
        if channels.next().is_some() {
            return None;
        }
        Some(pack_rgb(r, g, b))
    }
}

/// Scale an `h`, `hh`, `hhh` or `hhhh` channel down to 8 bits
fn parse_channel(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 4 {
        return None;
    }
    let value = u32::from_str_radix(s, 16).ok()?;
    let max = (1u32 << (4 * s.len())) - 1;
    Some(((value * 255 + max / 2) / max) as u8)
}
