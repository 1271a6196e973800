//! Decorative text-like strokes on the right page.

use image::{GrayImage, Rgba, RgbaImage};

use super::svg::fill_rect;
use super::{Layer, RenderContext};
use crate::icon::RectPx;

/// One horizontal stroke, in design units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSpec {
    pub y: f64,
    pub x_start: f64,
    pub x_end: f64,
}

/// Paints short horizontal lines in the primary color.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeLayer {
    pub strokes: Vec<StrokeSpec>,
    /// Stroke width in design units; never thinner than one pixel.
    pub width: f64,
    /// Opacity applied to the primary color (153 ≈ 60%).
    pub alpha: u8,
}

impl Default for StrokeLayer {
    fn default() -> Self {
        let stroke = |y, x_end| StrokeSpec {
            y,
            x_start: 70.0,
            x_end,
        };
        Self {
            strokes: vec![
                stroke(52.0, 87.0),
                stroke(60.0, 87.0),
                stroke(68.0, 87.0),
                // The last line is shorter, like the end of a paragraph
                stroke(76.0, 82.0),
            ],
            width: 2.0,
            alpha: 153,
        }
    }
}

impl Layer for StrokeLayer {
    fn name(&self) -> &'static str {
        "strokes"
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let scale = ctx.scale;
        let width = scale.px(self.width).max(1);
        let color = ctx.theme.primary_with_alpha(self.alpha);

        for stroke in &self.strokes {
            draw_hline(
                &mut ctx.canvas,
                scale.px(stroke.x_start),
                scale.px(stroke.x_end),
                scale.px(stroke.y),
                width,
                color,
                ctx.clip.as_ref(),
            );
        }
    }
}

/// Draws a horizontal line of `width` rows centered on row `y`, covering
/// columns `x1..=x2`. Pixels are replaced, not blended, and only where
/// `clip` allows.
pub fn draw_hline(
    dest: &mut RgbaImage,
    x1: u32,
    x2: u32,
    y: u32,
    width: u32,
    color: Rgba<u8>,
    clip: Option<&GrayImage>,
) {
    if width == 0 || x1 >= dest.width() || x2 < x1 {
        return;
    }
    let top = y.saturating_sub((width - 1) / 2);
    if top >= dest.height() {
        return;
    }
    fill_rect(dest, RectPx::from_corners(x1, top, x2, top + width - 1), color, clip);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconSize;
    use crate::theme::Theme;

    fn painted(size: u32) -> RgbaImage {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(IconSize::new(size).unwrap(), &theme);
        StrokeLayer::default().paint(&mut ctx);
        ctx.finish().image
    }

    #[test]
    fn strokes_at_design_size() {
        let img = painted(128);
        let ink = [16, 185, 129, 153];

        for y in [52, 60, 68] {
            assert_eq!(img.get_pixel(70, y).0, ink);
            assert_eq!(img.get_pixel(87, y).0, ink);
            assert_eq!(img.get_pixel(88, y).0, [0, 0, 0, 0]);
            // Two pixels thick
            assert_eq!(img.get_pixel(75, y + 1).0, ink);
            assert_eq!(img.get_pixel(75, y + 2).0, [0, 0, 0, 0]);
        }

        assert_eq!(img.get_pixel(82, 76).0, ink);
        assert_eq!(img.get_pixel(83, 76).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(69, 76).0, [0, 0, 0, 0]);
    }

    #[test]
    fn small_sizes_keep_one_pixel_strokes() {
        // 2 * 16/128 = 0.25 rounds to 0, clamped up to 1
        let img = painted(16);
        // 52 * 0.125 = 6.5 rounds to row 7, 60 * 0.125 = 7.5 rounds to row 8
        let row = 7;
        assert_eq!(img.get_pixel(9, row).0[3], 153);
        assert_eq!(img.get_pixel(9, row + 1).0[3], 153);
    }

    #[test]
    fn hline_clips_to_canvas() {
        let mut img = RgbaImage::new(4, 4);
        draw_hline(&mut img, 2, 10, 3, 3, Rgba([1, 2, 3, 4]), None);
        assert_eq!(img.get_pixel(3, 2).0, [1, 2, 3, 4]);
        assert_eq!(img.get_pixel(3, 3).0, [1, 2, 3, 4]);
        assert_eq!(img.get_pixel(1, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn hline_respects_clip() {
        let mut img = RgbaImage::new(4, 4);
        let mut clip = GrayImage::from_pixel(4, 4, image::Luma([255]));
        clip.put_pixel(3, 3, image::Luma([0]));
        draw_hline(&mut img, 0, 3, 3, 1, Rgba([1, 2, 3, 4]), Some(&clip));
        assert_eq!(img.get_pixel(2, 3).0, [1, 2, 3, 4]);
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }
}
