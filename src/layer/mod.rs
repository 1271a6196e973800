//! Layer infrastructure for icon rendering.
//!
//! An icon is painted by a fixed sequence of layers, each drawing into a
//! shared [`RenderContext`]. Layers hold their own design-space geometry
//! (authored on a 128×128 grid) and scale it to the canvas at paint time.
//!
//! # Pipeline
//!
//! ```text
//! transparent canvas
//!     │
//!     ▼
//! ┌────────────┐
//! │ Background │ ◄── vertical gradient clipped to a rounded square
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │    Book    │ ◄── two pages and a spine
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │   Glyph    │ ◄── best effort, skipped with a warning without a font
//! └─────┬──────┘
//!       ▼
//! ┌────────────┐
//! │  Strokes   │ ◄── four decorative lines
//! └────────────┘
//! ```

pub mod background;
pub mod book;
pub mod glyph;
pub mod strokes;
pub mod svg;

pub use background::BackgroundLayer;
pub use book::BookLayer;
pub use glyph::GlyphLayer;
pub use strokes::{StrokeLayer, StrokeSpec};

use image::{GrayImage, RgbaImage};

use crate::error::RenderWarning;
use crate::font::FontBook;
use crate::icon::{IconSize, RenderedIcon, Scale};
use crate::theme::Theme;

// ============================================================================
// Render Context
// ============================================================================

/// State that flows through the layer pipeline for a single icon.
pub struct RenderContext<'a> {
    /// The canvas being painted, `size × size`.
    pub canvas: RgbaImage,

    pub size: IconSize,

    /// Design-space to pixel mapping for this size.
    pub scale: Scale,

    pub theme: &'a Theme,

    /// Coverage mask left by the background. Later layers only paint where
    /// it is non-zero; `None` means the whole canvas is paintable.
    pub clip: Option<GrayImage>,

    warnings: Vec<RenderWarning>,
}

impl<'a> RenderContext<'a> {
    /// Creates a fully transparent canvas for the given size.
    pub fn new(size: IconSize, theme: &'a Theme) -> Self {
        Self {
            canvas: RgbaImage::new(size.get(), size.get()),
            size,
            scale: size.scale(),
            theme,
            clip: None,
            warnings: Vec::new(),
        }
    }

    /// Records a recovered problem and logs it.
    pub fn warn(&mut self, warning: RenderWarning) {
        log::warn!("icon {}: {warning}", self.size.get());
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }

    /// Ends the render, handing over the canvas and warnings.
    pub fn finish(self) -> RenderedIcon {
        RenderedIcon {
            size: self.size,
            image: self.canvas,
            warnings: self.warnings,
        }
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A step of the icon pipeline.
pub trait Layer {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Paints onto `ctx.canvas`.
    ///
    /// Layers never fail; anything they cannot draw is reported through
    /// [`RenderContext::warn`] and skipped.
    fn paint(&self, ctx: &mut RenderContext<'_>);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The ordered set of layers that make up the icon.
///
/// Fields are public so individual layers can be adjusted before rendering.
#[derive(Debug, Clone)]
pub struct LayerPipeline {
    pub background: BackgroundLayer,
    pub book: BookLayer,
    pub glyph: GlyphLayer,
    pub strokes: StrokeLayer,
}

impl LayerPipeline {
    /// Builds the standard pipeline, resolving the glyph font from `fonts`.
    pub fn new(fonts: FontBook) -> Self {
        Self {
            background: BackgroundLayer::default(),
            book: BookLayer::default(),
            glyph: GlyphLayer::new(fonts),
            strokes: StrokeLayer::default(),
        }
    }

    fn layers(&self) -> [&dyn Layer; 4] {
        [&self.background, &self.book, &self.glyph, &self.strokes]
    }

    /// Paints every layer, in order, onto a fresh canvas.
    pub fn render(&self, size: IconSize, theme: &Theme) -> RenderedIcon {
        let mut ctx = RenderContext::new(size, theme);

        for layer in self.layers() {
            log::debug!("icon {}: painting {}", size.get(), layer.name());
            layer.paint(&mut ctx);
        }

        ctx.finish()
    }
}
