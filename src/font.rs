//! Font discovery with an ordered fallback chain.
//!
//! A [`FontBook`] owns a font database and a list of [`FontStrategy`]
//! values. [`FontBook::resolve`] walks the list in order and stops at the
//! first strategy that names a usable face; when none do, it returns
//! [`FontResolution::Unavailable`] instead of failing.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::usvg::fontdb::{Database, Family, ID, Query, Source};

// ============================================================================
// FontStrategy
// ============================================================================

/// One way of finding a font face.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontStrategy {
    /// A font file on disk, loaded when the book is built.
    File(PathBuf),
    /// An installed family looked up by name.
    Family(String),
    /// The face the database maps the generic sans-serif family to.
    SansSerif,
    /// The first face the database knows about.
    AnyInstalled,
}

impl FontStrategy {
    pub fn family(name: impl Into<String>) -> Self {
        Self::Family(name.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl fmt::Display for FontStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Family(name) => write!(f, "family {name:?}"),
            Self::SansSerif => f.write_str("generic sans-serif"),
            Self::AnyInstalled => f.write_str("any installed face"),
        }
    }
}

/// The chain used when nothing else is configured: Helvetica, then Arial,
/// then whatever sans-serif or other face the system has.
///
/// No font is bundled with the crate. On a host with no installed faces
/// every step fails and the glyph is skipped with
/// [`RenderWarning::FontUnavailable`](crate::RenderWarning::FontUnavailable).
pub fn default_chain() -> Vec<FontStrategy> {
    vec![
        FontStrategy::family("Helvetica"),
        FontStrategy::family("Arial"),
        FontStrategy::SansSerif,
        FontStrategy::AnyInstalled,
    ]
}

// ============================================================================
// FontResolution
// ============================================================================

/// Outcome of walking a fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontResolution {
    /// A face was found; `family` is the name to render text with.
    Resolved {
        family: String,
        strategy: FontStrategy,
    },
    /// No strategy produced a face.
    Unavailable { tried: Vec<FontStrategy> },
}

impl FontResolution {
    pub fn family(&self) -> Option<&str> {
        match self {
            Self::Resolved { family, .. } => Some(family),
            Self::Unavailable { .. } => None,
        }
    }
}

// ============================================================================
// FontBook
// ============================================================================

/// A font database plus the fallback chain to search it with.
///
/// Cloning is cheap; the database is shared.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<Database>,
    chain: Vec<FontStrategy>,
    /// Family names of faces loaded from [`FontStrategy::File`] entries.
    file_families: HashMap<PathBuf, String>,
}

impl FontBook {
    /// Loads the system fonts and uses [`default_chain`].
    pub fn system() -> Self {
        Self::with_chain(default_chain())
    }

    /// Loads the system fonts plus any font files named in `chain`.
    pub fn with_chain(chain: Vec<FontStrategy>) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("loaded {} system font faces", db.len());
        Self::from_database(db, chain)
    }

    /// Uses an existing database. Font files in `chain` are loaded into it.
    pub fn from_database(mut db: Database, chain: Vec<FontStrategy>) -> Self {
        let mut file_families = HashMap::new();
        for strategy in &chain {
            if let FontStrategy::File(path) = strategy {
                if let Some(family) = load_font_file(&mut db, path) {
                    file_families.insert(path.clone(), family);
                }
            }
        }

        Self {
            db: Arc::new(db),
            chain,
            file_families,
        }
    }

    /// A book with no faces at all. Every resolution comes back unavailable.
    pub fn empty() -> Self {
        Self::from_database(Database::new(), default_chain())
    }

    pub fn chain(&self) -> &[FontStrategy] {
        &self.chain
    }

    /// Returns the shared database for handing to the SVG rasterizer.
    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Walks the chain and returns the first family that is available.
    pub fn resolve(&self) -> FontResolution {
        for strategy in &self.chain {
            if let Some(family) = self.try_strategy(strategy) {
                log::debug!("resolved font family {family:?} via {strategy}");
                return FontResolution::Resolved {
                    family,
                    strategy: strategy.clone(),
                };
            }
            log::debug!("font strategy unavailable: {strategy}");
        }

        FontResolution::Unavailable {
            tried: self.chain.clone(),
        }
    }

    fn try_strategy(&self, strategy: &FontStrategy) -> Option<String> {
        match strategy {
            FontStrategy::File(path) => self.file_families.get(path).cloned(),
            FontStrategy::Family(name) => self.query(Family::Name(name.as_str())),
            FontStrategy::SansSerif => self.query(Family::SansSerif),
            FontStrategy::AnyInstalled => self
                .db
                .faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone())),
        }
    }

    fn query(&self, family: Family<'_>) -> Option<String> {
        let families = [family];
        let id = self.db.query(&Query {
            families: &families,
            ..Query::default()
        })?;
        self.family_of(id)
    }

    fn family_of(&self, id: ID) -> Option<String> {
        self.db
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for FontBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("chain", &self.chain)
            .finish()
    }
}

/// Loads every face in a font file and returns the first face's family.
fn load_font_file(db: &mut Database, path: &Path) -> Option<String> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            log::debug!("skipping font file {}: {err}", path.display());
            return None;
        }
    };

    let ids = db.load_font_source(Source::Binary(Arc::new(data)));
    ids.iter()
        .find_map(|id| db.face(*id))
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_book_is_unavailable() {
        let book = FontBook::empty();
        assert_eq!(book.face_count(), 0);
        assert_eq!(
            book.resolve(),
            FontResolution::Unavailable {
                tried: default_chain()
            }
        );
    }

    #[test]
    fn missing_font_file_falls_through() {
        let chain = vec![
            FontStrategy::file("/nonexistent/Helvetica.ttc"),
            FontStrategy::AnyInstalled,
        ];
        let book = FontBook::from_database(Database::new(), chain.clone());
        assert_eq!(book.resolve(), FontResolution::Unavailable { tried: chain });
    }

    #[test]
    fn empty_chain_is_unavailable() {
        let book = FontBook::from_database(Database::new(), Vec::new());
        assert_eq!(book.resolve().family(), None);
    }

    #[test]
    fn system_resolution_names_a_real_family() {
        let book = FontBook::system();
        match book.resolve() {
            FontResolution::Resolved { family, .. } => assert!(!family.is_empty()),
            // Hosts without any fonts installed end up here
            FontResolution::Unavailable { tried } => {
                assert_eq!(book.face_count(), 0);
                assert_eq!(tried, default_chain());
            }
        }
    }

    #[test]
    fn strategies_display() {
        assert_eq!(FontStrategy::family("Arial").to_string(), "family \"Arial\"");
        assert_eq!(FontStrategy::SansSerif.to_string(), "generic sans-serif");
    }
}
