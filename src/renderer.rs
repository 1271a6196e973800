//! Icon rendering engine.

use crate::error::Error;
use crate::font::FontBook;
use crate::icon::{IconSize, RenderedIcon};
use crate::layer::LayerPipeline;
use crate::theme::Theme;

// ============================================================================
// IconRenderer
// ============================================================================

/// Draws the extension icon at any size.
///
/// The renderer is a pure function of the requested size, its [`Theme`] and
/// the fonts it was built with: rendering the same size twice produces
/// pixel-identical output.
///
/// # Layer Pipeline
///
/// 1. **Background** (`pipeline.background`) - gradient clipped to a rounded square
/// 2. **Book** (`pipeline.book`) - two translucent pages and a spine
/// 3. **Glyph** (`pipeline.glyph`) - the letter, skipped with a warning if no font resolves
/// 4. **Strokes** (`pipeline.strokes`) - four decorative lines
///
/// # Example
///
/// ```
/// use bigword_icons::{FontBook, IconRenderer, IconSize, Theme};
///
/// let renderer = IconRenderer::new(Theme::default(), FontBook::empty());
/// let icon = renderer.render(IconSize::new(48).unwrap());
///
/// assert_eq!(icon.image.dimensions(), (48, 48));
/// // No fonts were available, so the glyph was skipped
/// assert!(icon.has_warnings());
/// ```
#[derive(Debug, Clone)]
pub struct IconRenderer {
    theme: Theme,

    /// The layers. Adjust them directly to change the artwork.
    pub pipeline: LayerPipeline,
}

impl IconRenderer {
    pub fn new(theme: Theme, fonts: FontBook) -> Self {
        Self {
            theme,
            pipeline: LayerPipeline::new(fonts),
        }
    }

    /// Creates a renderer that searches the system fonts.
    pub fn with_system_fonts(theme: Theme) -> Self {
        Self::new(theme, FontBook::system())
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders the icon at `size`.
    pub fn render(&self, size: IconSize) -> RenderedIcon {
        let icon = self.pipeline.render(size, &self.theme);
        log::debug!(
            "rendered icon {} with {} warning(s)",
            size.get(),
            icon.warnings.len()
        );
        icon
    }

    /// Validates a raw pixel size, then renders.
    pub fn render_px(&self, px: u32) -> Result<RenderedIcon, Error> {
        Ok(self.render(IconSize::new(px)?))
    }
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::with_system_fonts(Theme::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
