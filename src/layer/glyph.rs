//! The letter on the left page.

use image::imageops;

use super::svg::{composite_over, ink_bounds, render_text};
use super::{Layer, RenderContext};
use crate::error::RenderWarning;
use crate::font::{FontBook, FontResolution};

/// Paints a single glyph in the primary color, centered on an anchor point.
///
/// The glyph is rasterized off-screen and its ink measured, so the visible
/// shape is centered regardless of the font's metrics. Drawing is best
/// effort: without a usable font the layer records a warning and paints
/// nothing.
#[derive(Debug, Clone)]
pub struct GlyphLayer {
    pub text: String,
    /// Center of the glyph's ink, in design units.
    pub anchor: (f64, f64),
    /// Font size in design units.
    pub font_size: f64,
    pub fonts: FontBook,
}

impl GlyphLayer {
    pub fn new(fonts: FontBook) -> Self {
        Self {
            text: "W".to_string(),
            anchor: (49.5, 68.0),
            font_size: 28.0,
            fonts,
        }
    }
}

impl Layer for GlyphLayer {
    fn name(&self) -> &'static str {
        "glyph"
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let family = match self.fonts.resolve() {
            FontResolution::Resolved { family, .. } => family,
            FontResolution::Unavailable { tried } => {
                ctx.warn(RenderWarning::FontUnavailable { tried });
                return;
            }
        };

        let font_size = ctx.scale.px(self.font_size);
        if font_size == 0 {
            ctx.warn(RenderWarning::GlyphTooSmall { font_size });
            return;
        }

        let rendered = render_text(
            &self.text,
            &family,
            font_size,
            ctx.theme.primary,
            self.fonts.database(),
        );
        let Some((glyph, bounds)) = rendered.and_then(|img| ink_bounds(&img).map(|b| (img, b)))
        else {
            ctx.warn(RenderWarning::EmptyGlyph { family });
            return;
        };

        let width = bounds.width + 1;
        let height = bounds.height + 1;
        let ink = imageops::crop_imm(&glyph, bounds.x, bounds.y, width, height).to_image();

        let x = (ctx.scale.apply(self.anchor.0) - f64::from(width) / 2.0).round() as i32;
        let y = (ctx.scale.apply(self.anchor.1) - f64::from(height) / 2.0).round() as i32;
        composite_over(&mut ctx.canvas, &ink, x, y, ctx.clip.as_ref());
    }
}
