//! bigword-icons: procedural icon generator for the Big Big Word extension
//!
//! This crate draws the extension's icon (a gradient rounded square with an
//! open book, a letter and a few decorative lines) at any size and writes
//! the PNG files a browser-extension manifest expects.
//!
//! # Example
//!
//! ```
//! use bigword_icons::{FontBook, IconRenderer, IconSize, Theme};
//!
//! let renderer = IconRenderer::new(Theme::default(), FontBook::empty());
//! let icon = renderer.render(IconSize::new(32).unwrap());
//! let png = icon.encode_png().unwrap();
//! assert!(!png.is_empty());
//! ```
//!
//! # Writing Files
//!
//! ```no_run
//! use bigword_icons::{generate_icons, IconRenderer, IconSize};
//! use std::path::Path;
//!
//! let renderer = IconRenderer::default();
//! let report = generate_icons(&renderer, &IconSize::EXTENSION_SIZES, Path::new("icons"));
//! for outcome in &report.outcomes {
//!     println!("{}: {:?}", outcome.path.display(), outcome.result);
//! }
//! ```
//!
//! # Themes
//!
//! Colors come from a [`Theme`], which can be loaded from JSON through
//! [`ThemeSettings`]:
//!
//! ```
//! use bigword_icons::ThemeSettings;
//!
//! let settings = ThemeSettings::from_json(r##"{"primary":"#3B82F6","secondary":"#2563EB"}"##).unwrap();
//! let theme = settings.to_theme().unwrap();
//! ```

mod driver;
mod error;
mod font;
mod icon;
mod layer;
mod renderer;
mod theme;

pub use driver::{generate_icons, write_icon, FileOutcome, GenerationReport};
pub use error::{Error, RenderWarning};
pub use font::{default_chain, FontBook, FontResolution, FontStrategy};
pub use icon::{IconSize, RectPx, RenderedIcon, Scale, DESIGN_SIZE, MAX_ICON_SIZE};
pub use layer::{
    BackgroundLayer, BookLayer, GlyphLayer, Layer, LayerPipeline, RenderContext, StrokeLayer,
    StrokeSpec,
};
pub use renderer::IconRenderer;
pub use theme::{Theme, ThemeSettings, DEFAULT_PRIMARY, DEFAULT_SECONDARY};
