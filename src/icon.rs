//! Icon sizes, design-space scaling and rendered output.
//!
//! All geometry is authored in a 128×128 design space and mapped onto the
//! target pixel grid through a [`Scale`].

use std::fmt;
use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, RenderWarning};

/// Edge length of the design space every shape is authored in.
pub const DESIGN_SIZE: u32 = 128;

/// Largest pixel size accepted by [`IconSize::new`].
pub const MAX_ICON_SIZE: u32 = 4096;

// ============================================================================
// IconSize
// ============================================================================

/// A validated, square icon edge length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconSize(u32);

impl IconSize {
    /// The sizes a browser extension manifest asks for, in output order.
    pub const EXTENSION_SIZES: [IconSize; 4] =
        [IconSize(16), IconSize(32), IconSize(48), IconSize(128)];

    /// Validates a pixel size.
    ///
    /// Zero and anything above [`MAX_ICON_SIZE`] are rejected.
    pub fn new(px: u32) -> Result<Self, Error> {
        if px == 0 || px > MAX_ICON_SIZE {
            return Err(Error::InvalidSize { size: px });
        }
        Ok(Self(px))
    }

    /// Returns the edge length in pixels.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the design-space scale for this size.
    pub fn scale(self) -> Scale {
        Scale::for_size(self.0)
    }

    /// The file name the driver writes this size to, e.g. `icon48.png`.
    pub fn file_name(self) -> String {
        format!("icon{}.png", self.0)
    }
}

impl TryFrom<u32> for IconSize {
    type Error = Error;

    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::new(px)
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.0, self.0)
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Maps design-space coordinates onto the pixel grid (`size / 128`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub fn for_size(px: u32) -> Self {
        Self(f64::from(px) / f64::from(DESIGN_SIZE))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Scales a design coordinate without rounding.
    pub fn apply(self, design: f64) -> f64 {
        design * self.0
    }

    /// Scales a design coordinate and rounds it to a whole pixel.
    pub fn px(self, design: f64) -> u32 {
        self.apply(design).round().max(0.0) as u32
    }
}

// ============================================================================
// RectPx
// ============================================================================

/// An axis-aligned rectangle in pixel coordinates.
///
/// Filled rectangles cover both edges: columns `x..=right()` and rows
/// `y..=bottom()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Builds a rectangle from inclusive corner coordinates.
    pub fn from_corners(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        (self.x..=self.right()).contains(&px) && (self.y..=self.bottom()).contains(&py)
    }
}

// ============================================================================
// RenderedIcon
// ============================================================================

/// A finished icon together with anything that was skipped along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    pub size: IconSize,

    /// The composited RGBA canvas, `size × size`.
    pub image: RgbaImage,

    /// Recovered problems, in the order they occurred.
    pub warnings: Vec<RenderWarning>,
}

impl RenderedIcon {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Encodes the canvas as an RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_size_bounds() {
        assert!(IconSize::new(0).is_err());
        assert!(IconSize::new(MAX_ICON_SIZE + 1).is_err());
        assert_eq!(IconSize::new(1).unwrap().get(), 1);
        assert_eq!(IconSize::try_from(48).unwrap().file_name(), "icon48.png");
    }

    #[test]
    fn scale_rounds_to_pixels() {
        let scale = Scale::for_size(16);
        assert_eq!(scale.factor(), 0.125);
        assert_eq!(scale.px(24.0), 3);
        // 28 * 0.125 = 3.5 rounds away from zero
        assert_eq!(scale.px(28.0), 4);
        assert_eq!(Scale::for_size(256).px(35.0), 70);
    }

    #[test]
    fn rect_px_edges_are_inclusive() {
        let rect = RectPx::new(35, 40, 29, 48);
        assert_eq!(rect.right(), 64);
        assert_eq!(rect.bottom(), 88);
        assert!(rect.contains(64, 88));
        assert!(!rect.contains(65, 88));
        assert!(!rect.contains(34, 40));
        assert_eq!(RectPx::from_corners(62, 40, 66, 88), RectPx::new(62, 40, 4, 48));
    }

    #[test]
    fn rendered_icon_encodes_png() {
        let icon = RenderedIcon {
            size: IconSize::new(4).unwrap(),
            image: RgbaImage::new(4, 4),
            warnings: Vec::new(),
        };
        let bytes = icon.encode_png().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
