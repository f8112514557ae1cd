//! Hex color parsing and formatting.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Six hex digits, with an optional leading `#`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?[0-9A-Fa-f]{6}$").unwrap());

/// Pure white, used for text on primary-colored bars.
pub const WHITE: &str = "#ffffff";

/// Light gray used for agenda row shading and KPI card backgrounds.
pub const LIGHT_GRAY: &str = "#f8f9fa";

/// Fill of the image placeholder block.
pub const PLACEHOLDER_FILL: &str = "#e2e8f0";

/// Color of a positive KPI delta.
pub const DELTA_UP: &str = "#10b981";

/// Color of a negative KPI delta.
pub const DELTA_DOWN: &str = "#ef4444";

/// An RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral gray with all channels equal to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Uppercase `RRGGBB` form, as used by `srgbClr` in DrawingML.
    pub fn to_srgb(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Check whether a string is a well-formed hex color.
pub fn is_hex_color(hex: &str) -> bool {
    HEX_COLOR_REGEX.is_match(hex)
}

/// Parse a `#rrggbb` (or `rrggbb`) string into an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    if !is_hex_color(hex) {
        return Err(Error::InvalidColorFormat(hex.to_string()));
    }
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| Error::InvalidColorFormat(hex.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Gray level for a watermark of the given opacity (0-100).
///
/// 0% yields white (255) and 100% yields black (0).
pub fn watermark_gray(opacity: u8) -> u8 {
    let opacity = f64::from(opacity.min(100));
    let level = 255.0 - (opacity * 2.55).round();
    level.clamp(0.0, 255.0) as u8
}
