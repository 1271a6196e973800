//! Open-book shapes: two pages and a spine.

use image::Rgba;

use super::svg::fill_rect;
use super::{Layer, RenderContext};
use crate::icon::{RectPx, Scale};

/// Paints the two book pages and the spine between them.
///
/// Positions and sizes are in design units. Each value is scaled and
/// rounded on its own, so a page's right edge is `round(x) + round(width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookLayer {
    pub left_page_origin: (f64, f64),
    pub right_page_origin: (f64, f64),
    pub page_width: f64,
    pub page_height: f64,
    /// Left and right x of the spine; it spans the pages' vertical extent.
    pub spine_x: (f64, f64),
    pub left_page_alpha: u8,
    pub right_page_alpha: u8,
    pub spine_alpha: u8,
}

impl Default for BookLayer {
    fn default() -> Self {
        Self {
            left_page_origin: (35.0, 40.0),
            right_page_origin: (64.0, 40.0),
            page_width: 29.0,
            page_height: 48.0,
            spine_x: (62.0, 66.0),
            // ~95%, ~85% and ~70% opaque white
            left_page_alpha: 242,
            right_page_alpha: 217,
            spine_alpha: 179,
        }
    }
}

impl BookLayer {
    fn page(&self, origin: (f64, f64), scale: Scale) -> RectPx {
        RectPx::new(
            scale.px(origin.0),
            scale.px(origin.1),
            scale.px(self.page_width),
            scale.px(self.page_height),
        )
    }

    pub fn left_page(&self, scale: Scale) -> RectPx {
        self.page(self.left_page_origin, scale)
    }

    pub fn right_page(&self, scale: Scale) -> RectPx {
        self.page(self.right_page_origin, scale)
    }

    /// The spine shares the top and bottom of the left page.
    pub fn spine(&self, scale: Scale) -> RectPx {
        let page = self.left_page(scale);
        RectPx::from_corners(
            scale.px(self.spine_x.0),
            page.y,
            scale.px(self.spine_x.1),
            page.bottom(),
        )
    }
}

impl Layer for BookLayer {
    fn name(&self) -> &'static str {
        "book"
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let scale = ctx.scale;
        let white = |alpha: u8| Rgba([255, 255, 255, alpha]);

        let clip = ctx.clip.as_ref();
        fill_rect(&mut ctx.canvas, self.left_page(scale), white(self.left_page_alpha), clip);
        fill_rect(&mut ctx.canvas, self.right_page(scale), white(self.right_page_alpha), clip);
        fill_rect(&mut ctx.canvas, self.spine(scale), white(self.spine_alpha), clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::IconSize;
    use crate::theme::Theme;

    #[test]
    fn geometry_at_design_size() {
        let book = BookLayer::default();
        let scale = Scale::for_size(128);

        let left = book.left_page(scale);
        assert_eq!((left.x, left.y, left.right(), left.bottom()), (35, 40, 64, 88));

        let right = book.right_page(scale);
        assert_eq!((right.x, right.y, right.right(), right.bottom()), (64, 40, 93, 88));

        assert_eq!(book.spine(scale), RectPx::from_corners(62, 40, 66, 88));
    }

    #[test]
    fn geometry_scales_linearly() {
        let left = BookLayer::default().left_page(Scale::for_size(256));
        assert_eq!((left.x, left.y, left.right(), left.bottom()), (70, 80, 128, 176));
    }

    #[test]
    fn paints_translucent_white() {
        let theme = Theme::default();
        let mut ctx = RenderContext::new(IconSize::new(128).unwrap(), &theme);
        BookLayer::default().paint(&mut ctx);
        let img = ctx.finish().image;

        assert_eq!(img.get_pixel(40, 50).0, [255, 255, 255, 242]);
        assert_eq!(img.get_pixel(80, 50).0, [255, 255, 255, 217]);
        assert_eq!(img.get_pixel(63, 50).0, [255, 255, 255, 179]);
        assert_eq!(img.get_pixel(34, 50).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(40, 89).0, [0, 0, 0, 0]);
    }
}
