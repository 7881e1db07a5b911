//! Font registry: the set of font families available to the rasterizer.
//!
//! Families are registered by alias at startup with [`FontRegistry::load_font`].
//! Lookups of families that were never loaded (or failed to load) fall back to
//! the system font database, so a failed load degrades the rendered face
//! instead of failing rasterization.

mod fallbacks;
mod fetch;
mod types;

use std::collections::HashMap;

use fontdb::{Database, Family, Query};
use glyph_raster_config::{Config, FontSource};
use parking_lot::RwLock;

use crate::error::FontLoadError;

pub use fallbacks::FALLBACK_FAMILIES;
pub use fetch::{DefaultFontFetcher, FontFetcher, FontLocation};
pub use types::FontData;

/// Named font families plus a system fallback pool.
///
/// Loading must finish before the first render in a family; the registry
/// does not track in-flight loads.
pub struct FontRegistry {
    /// Retrieval capability for `load_font`
    fetcher: Box<dyn FontFetcher>,

    /// Families registered via `load_font`, keyed by alias
    families: RwLock<HashMap<String, FontData>>,

    /// Resolved substitutes for families that were requested but never loaded
    substitutes: RwLock<HashMap<String, FontData>>,

    /// System font database used for fallback
    system: Database,
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("families", &self.families.read().keys().collect::<Vec<_>>())
            .field("system_faces", &self.system.len())
            .finish()
    }
}

impl FontRegistry {
    /// Create a registry that retrieves fonts through `fetcher`.
    ///
    /// When `load_system_fonts` is set, installed system fonts are indexed as
    /// the fallback pool.
    pub fn new(fetcher: Box<dyn FontFetcher>, load_system_fonts: bool) -> Self {
        let mut system = Database::new();
        if load_system_fonts {
            system.load_system_fonts();
            log::info!("Loaded {} system fonts", system.len());
        }
        Self {
            fetcher,
            families: RwLock::new(HashMap::new()),
            substitutes: RwLock::new(HashMap::new()),
            system,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(DefaultFontFetcher::from_config(config)),
            config.load_system_fonts,
        )
    }

    /// Fetch the font at `url` and register it under `family`.
    ///
    /// The alias replaces any earlier registration or substitute for the
    /// same family.
    pub fn load_font(&self, url: &str, family: &str) -> Result<(), FontLoadError> {
        log::info!("Loading font '{}' from {}", family, url);
        let bytes = self.fetcher.fetch(url)?;
        let font_data = FontData::new(bytes).ok_or_else(|| FontLoadError::Parse {
            url: url.to_string(),
        })?;

        self.families.write().insert(family.to_string(), font_data);
        self.substitutes.write().remove(family);
        log::info!("Successfully loaded font: {}", family);
        Ok(())
    }

    /// Load each source in order, stopping at the first failure.
    pub fn load_fonts(&self, sources: &[FontSource]) -> Result<(), FontLoadError> {
        for source in sources {
            self.load_font(&source.url, &source.family)?;
        }
        Ok(())
    }

    /// Load the fonts listed in `config`.
    pub fn load_configured(&self, config: &Config) -> Result<(), FontLoadError> {
        self.load_fonts(&config.fonts)
    }

    /// Whether `family` was registered via `load_font`.
    pub fn is_loaded(&self, family: &str) -> bool {
        self.families.read().contains_key(family)
    }

    /// Whether any face at all can be supplied.
    pub fn has_faces(&self) -> bool {
        !self.families.read().is_empty() || !self.system.is_empty()
    }

    /// Look up a face for `family`, substituting a fallback if needed.
    ///
    /// Returns `None` only when no face is available at all.
    pub fn face(&self, family: &str) -> Option<FontData> {
        if let Some(font_data) = self.families.read().get(family) {
            return Some(font_data.clone());
        }
        if let Some(font_data) = self.substitutes.read().get(family) {
            return Some(font_data.clone());
        }

        let substitute = self.find_substitute(family)?;
        self.substitutes
            .write()
            .insert(family.to_string(), substitute.clone());
        Some(substitute)
    }

    fn find_substitute(&self, family: &str) -> Option<FontData> {
        let (base_family, weight) = split_weight(family);
        if let Some(font_data) = self.query_system(&[Family::Name(base_family)], weight) {
            log::debug!("Font '{}' resolved from system fonts", family);
            return Some(font_data);
        }

        for fallback in FALLBACK_FAMILIES {
            if let Some(font_data) = self.query_system(&[Family::Name(fallback)], weight) {
                log::warn!(
                    "Font '{}' not loaded, substituting system font '{}'",
                    family,
                    fallback
                );
                return Some(font_data);
            }
        }

        if let Some(font_data) = self.query_system(&[Family::SansSerif, Family::Monospace], weight)
        {
            log::warn!("Font '{}' not loaded, substituting generic family", family);
            return Some(font_data);
        }

        if let Some(face) = self.system.faces().next() {
            log::warn!("Font '{}' not loaded, substituting first system face", family);
            return self.face_data(face.id);
        }

        let families = self.families.read();
        let mut names: Vec<&String> = families.keys().collect();
        names.sort();
        let first = names.first()?;
        log::warn!("Font '{}' not available, substituting '{}'", family, first);
        families.get(*first).cloned()
    }

    fn query_system(&self, families: &[Family<'_>], weight: fontdb::Weight) -> Option<FontData> {
        let query = Query {
            families,
            weight,
            ..Query::default()
        };
        let id = self.system.query(&query)?;
        self.face_data(id)
    }

    fn face_data(&self, id: fontdb::ID) -> Option<FontData> {
        let (bytes, index) = self
            .system
            .with_face_data(id, |data, index| (data.to_vec(), index))?;
        FontData::new_with_index(bytes, index as usize)
    }
}

/// Split a " Bold" suffix off a family alias so the system query can ask for
/// the base family at bold weight.
fn split_weight(family: &str) -> (&str, fontdb::Weight) {
    match family.strip_suffix(" Bold") {
        Some(base) => (base, fontdb::Weight::BOLD),
        None => (family, fontdb::Weight::NORMAL),
    }
}
