//! Rounded-square gradient background.

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

use super::{Layer, RenderContext};
use crate::theme::Theme;

/// Paints the vertical theme gradient, clipped to a rounded square.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    /// Corner radius in design units.
    pub corner_radius: f64,
}

impl Default for BackgroundLayer {
    fn default() -> Self {
        Self {
            corner_radius: 24.0,
        }
    }
}

impl Layer for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let size = ctx.size.get();
        let gradient = vertical_gradient(size, ctx.theme);
        let mask = rounded_mask(size, ctx.scale.px(self.corner_radius));
        apply_mask(&mut ctx.canvas, &gradient, &mask);
        ctx.clip = Some(mask);
    }
}

/// Builds a `size × size` gradient from primary (top) to secondary.
///
/// Row `y` uses ratio `y / size`, so the last row stops just short of the
/// secondary color. There is no horizontal variation.
pub fn vertical_gradient(size: u32, theme: &Theme) -> RgbImage {
    let rows: Vec<Rgb<u8>> = (0..size)
        .map(|y| {
            let c = theme.gradient_at(f64::from(y) / f64::from(size));
            Rgb([c.red, c.green, c.blue])
        })
        .collect();

    RgbImage::from_fn(size, size, |_, y| rows[y as usize])
}

/// Builds a binary mask of a rounded square filling the whole canvas.
///
/// A pixel is inside when its center lies within `radius - 0.5` of the
/// nearest point of the inner (corner-center) rectangle. Along the straight
/// edges that is every pixel; at the corners it always excludes the corner
/// pixel itself once `radius > 0`.
pub fn rounded_mask(size: u32, radius: u32) -> GrayImage {
    let s = f64::from(size);
    let r = f64::from(radius.min(size / 2));
    let limit = r - 0.5;

    GrayImage::from_fn(size, size, |x, y| {
        if r == 0.0 {
            return Luma([255]);
        }
        let cx = f64::from(x) + 0.5;
        let cy = f64::from(y) + 0.5;
        let dx = cx - cx.clamp(r, s - r);
        let dy = cy - cy.clamp(r, s - r);
        if dx * dx + dy * dy <= limit * limit {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Copies `src` onto `dest` wherever the mask is set, using the mask value
/// as alpha. Masked-out pixels are left untouched.
pub fn apply_mask(dest: &mut RgbaImage, src: &RgbImage, mask: &GrayImage) {
    for (x, y, m) in mask.enumerate_pixels() {
        let alpha = m[0];
        if alpha == 0 {
            continue;
        }
        let Rgb([r, g, b]) = *src.get_pixel(x, y);
        dest.put_pixel(x, y, Rgba([r, g, b, alpha]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconSize;

    fn painted(size: u32) -> RgbaImage {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(IconSize::new(size).unwrap(), &theme);
        BackgroundLayer::default().paint(&mut ctx);
        ctx.finish().image
    }

    #[test]
    fn gradient_starts_at_primary_and_ends_near_secondary() {
        let theme = Theme::default();
        for size in [48, 128] {
            let gradient = vertical_gradient(size, &theme);
            let top = gradient.get_pixel(0, 0).0;
            let bottom = gradient.get_pixel(0, size - 1).0;
            assert_eq!(top, [16, 185, 129]);

            let secondary = [5u8, 150, 105];
            for (got, want) in bottom.iter().zip(secondary) {
                assert!(got.abs_diff(want) <= 1, "size {size}: {bottom:?}");
            }
        }
    }

    #[test]
    fn gradient_is_monotone_and_row_uniform() {
        let gradient = vertical_gradient(128, &Theme::default());
        for y in 1..128 {
            let above = gradient.get_pixel(5, y - 1).0;
            let here = gradient.get_pixel(5, y).0;
            // Every default theme channel decreases from primary to secondary
            for c in 0..3 {
                assert!(here[c] <= above[c], "row {y} channel {c} reversed");
            }
            assert_eq!(gradient.get_pixel(0, y), gradient.get_pixel(127, y));
        }
    }

    #[test]
    fn mask_clears_corners() {
        for size in [8, 16, 32, 48, 128] {
            let radius = (24.0 * f64::from(size) / 128.0).round() as u32;
            assert!(radius > 0);
            let mask = rounded_mask(size, radius);
            let last = size - 1;
            for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
                assert_eq!(mask.get_pixel(x, y)[0], 0, "size {size} corner ({x}, {y})");
            }
            // Edge midpoints and the center stay inside
            assert_eq!(mask.get_pixel(0, size / 2)[0], 255);
            assert_eq!(mask.get_pixel(size / 2, last)[0], 255);
            assert_eq!(mask.get_pixel(size / 2, size / 2)[0], 255);
        }
    }

    #[test]
    fn zero_radius_mask_is_full() {
        let mask = rounded_mask(4, 0);
        assert!(mask.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn background_is_transparent_outside_the_mask() {
        let img = painted(128);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(127, 127).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(64, 0).0, [16, 185, 129, 255]);
    }

    #[test]
    fn leaves_its_mask_as_the_clip() {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(IconSize::new(16).unwrap(), &theme);
        assert!(ctx.clip.is_none());
        BackgroundLayer::default().paint(&mut ctx);
        assert_eq!(ctx.clip, Some(rounded_mask(16, 3)));
    }
}
