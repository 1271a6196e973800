//! Theme colors and their serializable settings.
//!
//! A [`Theme`] is the immutable pair of colors every layer draws with. The
//! serializable counterpart, [`ThemeSettings`], stores them as hex strings so
//! a theme can be kept in a JSON file next to the extension:
//!
//! ```json
//! { "name": "Green (Emerald)", "primary": "#10B981", "secondary": "#059669" }
//! ```

use std::path::Path;

use image::Rgba;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Emerald-500.
pub const DEFAULT_PRIMARY: &str = "#10B981";
/// Emerald-600.
pub const DEFAULT_SECONDARY: &str = "#059669";

const DEFAULT_NAME: &str = "Green (Emerald)";

// ============================================================================
// Theme
// ============================================================================

/// The two colors an icon is drawn with.
///
/// `primary` starts the background gradient and colors the glyph and
/// decorative strokes; `secondary` ends the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub primary: Srgb<u8>,
    pub secondary: Srgb<u8>,
}

impl Theme {
    pub fn new(primary: Srgb<u8>, secondary: Srgb<u8>) -> Self {
        Self { primary, secondary }
    }

    /// Parses both colors from hex codes (`#rrggbb` or `#rgb`, `#` optional).
    pub fn from_hex(primary: &str, secondary: &str) -> Result<Self, Error> {
        Ok(Self::new(parse_hex(primary)?, parse_hex(secondary)?))
    }

    /// Color of the vertical gradient at `ratio` (0.0 = top, 1.0 = bottom).
    ///
    /// Channels are interpolated linearly and truncated.
    pub fn gradient_at(&self, ratio: f64) -> Srgb<u8> {
        let t = ratio.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
        Srgb::new(
            lerp(self.primary.red, self.secondary.red),
            lerp(self.primary.green, self.secondary.green),
            lerp(self.primary.blue, self.secondary.blue),
        )
    }

    /// The primary color with the given opacity.
    pub fn primary_with_alpha(&self, alpha: u8) -> Rgba<u8> {
        with_alpha(self.primary, alpha)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(
            Srgb::new(0x10, 0xB9, 0x81),
            Srgb::new(0x05, 0x96, 0x69),
        )
    }
}

pub(crate) fn with_alpha(color: Srgb<u8>, alpha: u8) -> Rgba<u8> {
    Rgba([color.red, color.green, color.blue, alpha])
}

fn parse_hex(value: &str) -> Result<Srgb<u8>, Error> {
    value.trim().parse().map_err(|_| Error::InvalidColor {
        value: value.to_string(),
    })
}

fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

// ============================================================================
// ThemeSettings
// ============================================================================

/// Serializable theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Display name, only used in console output.
    #[serde(default = "default_name")]
    pub name: String,

    /// Gradient start, glyph and stroke color.
    pub primary: String,

    /// Gradient end color.
    pub secondary: String,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
        }
    }
}

impl ThemeSettings {
    /// Validates the hex codes and builds a [`Theme`].
    pub fn to_theme(&self) -> Result<Theme, Error> {
        Theme::from_hex(&self.primary, &self.secondary)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::from_json(&json)?)
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&Theme> for ThemeSettings {
    fn from(theme: &Theme) -> Self {
        Self {
            name: default_name(),
            primary: to_hex(theme.primary),
            secondary: to_hex(theme.secondary),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
