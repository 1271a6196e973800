//! Error and warning types.

use std::path::PathBuf;

use crate::font::FontStrategy;

/// Errors produced while configuring the renderer or writing icons.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested pixel size is zero or larger than [`MAX_ICON_SIZE`](crate::MAX_ICON_SIZE).
    #[error("invalid icon size {size}: expected 1..={max}", max = crate::MAX_ICON_SIZE)]
    InvalidSize { size: u32 },

    /// A theme color is not a valid `#rrggbb` or `#rgb` hex code.
    #[error("invalid color {value:?}: expected a hex code such as \"#10B981\"")]
    InvalidColor { value: String },

    /// Theme settings JSON could not be parsed.
    #[error("invalid theme settings: {0}")]
    Theme(#[from] serde_json::Error),

    /// The rendered image could not be encoded.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A problem that was recovered from while rendering.
///
/// Warnings never abort a render; the affected step is skipped and the rest
/// of the icon is still produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderWarning {
    /// Every font strategy in the fallback chain came up empty.
    #[error("no usable font (tried {})", describe_chain(.tried))]
    FontUnavailable { tried: Vec<FontStrategy> },

    /// The scaled font size rounds down to zero pixels.
    #[error("glyph skipped: font size rounds to {font_size}px")]
    GlyphTooSmall { font_size: u32 },

    /// The font resolved but rasterizing the glyph produced no ink to measure.
    #[error("glyph skipped: {family:?} rendered no visible ink")]
    EmptyGlyph { family: String },
}

fn describe_chain(tried: &[FontStrategy]) -> String {
    if tried.is_empty() {
        return "nothing".to_string();
    }
    tried
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
