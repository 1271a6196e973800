//! Rasterization helpers shared by the layers.
//!
//! Text is rendered by wrapping it in a small SVG document and handing that
//! to resvg/usvg, which shapes it against the font database. Everything else
//! is written straight into the `image` buffers.

use std::sync::Arc;

use image::{GrayImage, Rgba, RgbaImage};
use palette::Srgb;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::fontdb::Database;
use resvg::usvg::{Options, Tree};

use crate::icon::RectPx;

// ============================================================================
// Text Rendering
// ============================================================================

/// Renders `text` with the given family onto a transparent square canvas.
///
/// The canvas is three font sizes wide with the baseline two font sizes
/// down, which leaves room for any single glyph. Callers measure the ink
/// themselves; the placement inside the canvas carries no meaning.
///
/// Returns `None` if the document cannot be parsed or the canvas cannot be
/// allocated.
pub fn render_text(
    text: &str,
    family: &str,
    font_size: u32,
    color: Srgb<u8>,
    fontdb: Arc<Database>,
) -> Option<RgbaImage> {
    let side = font_size.checked_mul(3)?;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{side}" height="{side}"><text x="{x}" y="{y}" font-family="{family}" font-size="{font_size}" fill="#{r:02x}{g:02x}{b:02x}">{text}</text></svg>"##,
        x = font_size,
        y = font_size * 2,
        family = escape_xml(family),
        r = color.red,
        g = color.green,
        b = color.blue,
        text = escape_xml(text),
    );

    let mut opts = Options::default();
    opts.font_family = family.to_string();
    opts.fontdb = fontdb;
    let tree = Tree::from_str(&svg, &opts).ok()?;

    let mut pixmap = Pixmap::new(side, side)?;
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

    Some(pixmap_to_rgba_image(&pixmap))
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
        // Always in bounds: the closure only visits the pixmap's own grid
        let Some(pixel) = pixmap.pixel(x, y) else {
            return Rgba([0, 0, 0, 0]);
        };
        // tiny_skia uses premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        Rgba([r, g, b, a])
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

/// Returns the smallest rectangle containing every pixel with non-zero alpha.
pub fn ink_bounds(img: &RgbaImage) -> Option<RectPx> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    bounds.map(|(l, t, r, b)| RectPx::from_corners(l, t, r, b))
}

// ============================================================================
// Painting
// ============================================================================

/// Overwrites every pixel of `rect` (edges included) with `color`.
///
/// This is a copy, not a blend: a translucent color leaves a translucent
/// pixel behind. Parts outside the canvas, or where `clip` is zero, are
/// left untouched.
pub fn fill_rect(dest: &mut RgbaImage, rect: RectPx, color: Rgba<u8>, clip: Option<&GrayImage>) {
    let right = rect.right().min(dest.width().saturating_sub(1));
    let bottom = rect.bottom().min(dest.height().saturating_sub(1));

    for y in rect.y..=bottom {
        for x in rect.x..=right {
            if is_clipped(clip, x, y) {
                continue;
            }
            dest.put_pixel(x, y, color);
        }
    }
}

fn is_clipped(clip: Option<&GrayImage>, x: u32, y: u32) -> bool {
    clip.and_then(|mask| mask.get_pixel_checked(x, y))
        .is_some_and(|m| m[0] == 0)
}

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination). Pixels where
/// `clip` is zero are skipped.
pub fn composite_over(
    dest: &mut RgbaImage,
    src: &RgbaImage,
    x: i32,
    y: i32,
    clip: Option<&GrayImage>,
) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x + sx as i32;
        let dy = y + sy as i32;

        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }
        if is_clipped(clip, dx as u32, dy as u32) {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_replaces_and_clips() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255]));
        fill_rect(&mut img, RectPx::new(7, 7, 5, 5), Rgba([255, 255, 255, 100]), None);

        // Replaced, not blended
        assert_eq!(img.get_pixel(7, 7).0, [255, 255, 255, 100]);
        assert_eq!(img.get_pixel(9, 9).0, [255, 255, 255, 100]);
        assert_eq!(img.get_pixel(6, 7).0, [0, 255, 0, 255]);
    }

    #[test]
    fn clip_mask_protects_masked_out_pixels() {
        let mut img = RgbaImage::new(4, 4);
        let mut clip = GrayImage::from_pixel(4, 4, image::Luma([255]));
        clip.put_pixel(3, 3, image::Luma([0]));

        fill_rect(&mut img, RectPx::new(2, 2, 1, 1), Rgba([255, 255, 255, 217]), Some(&clip));
        assert_eq!(img.get_pixel(2, 2).0, [255, 255, 255, 217]);
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 0]);

        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        composite_over(&mut img, &src, 2, 2, Some(&clip));
        assert_eq!(img.get_pixel(2, 3).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn composite_simple() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, 3, 3, None);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_clips_negative_offsets() {
        let mut dest = RgbaImage::new(4, 4);
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src, -2, -2, None);

        assert_eq!(dest.get_pixel(1, 1).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(2, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn composite_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src, 0, 0, None);

        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn ink_bounds_finds_extent() {
        let mut img = RgbaImage::new(10, 10);
        assert_eq!(ink_bounds(&img), None);

        img.put_pixel(2, 3, Rgba([0, 0, 0, 1]));
        img.put_pixel(6, 8, Rgba([0, 0, 0, 255]));
        assert_eq!(ink_bounds(&img), Some(RectPx::from_corners(2, 3, 6, 8)));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("A&B <\"x\">"), "A&amp;B &lt;&quot;x&quot;&gt;");
    }

    #[test]
    fn render_text_without_fonts_has_no_ink() {
        let img = render_text("W", "Nothing", 12, Srgb::new(0, 0, 0), Arc::new(Database::new()));
        // Parsing succeeds, but there is nothing to shape the text with
        if let Some(img) = img {
            assert_eq!(img.width(), 36);
            assert_eq!(ink_bounds(&img), None);
        }
    }
}
