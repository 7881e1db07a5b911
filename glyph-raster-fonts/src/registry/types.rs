//! Font data types owned by the registry.

use std::sync::Arc;

use swash::{CacheKey, FontRef};

/// Owned font bytes plus the location of one face inside them.
///
/// Cloning is cheap; the bytes are shared. The swash cache key is kept so
/// scale contexts can reuse cached outlines across lookups of the same face.
#[derive(Clone)]
pub struct FontData {
    /// Raw font data bytes (TTF/OTF/TTC)
    pub data: Arc<Vec<u8>>,
    offset: u32,
    key: CacheKey,
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontData")
            .field("data_len", &self.data.len())
            .field("offset", &self.offset)
            .finish()
    }
}

impl FontData {
    /// Create a new FontData from bytes using face index 0.
    ///
    /// Returns `None` if the bytes are not a parseable font.
    pub fn new(data: Vec<u8>) -> Option<Self> {
        Self::new_with_index(data, 0)
    }

    /// Create a new FontData from bytes with a specific face index.
    ///
    /// This is needed for TrueType Collection (.ttc) files where multiple
    /// font faces share the same data but have different face indices.
    pub fn new_with_index(data: Vec<u8>, face_index: usize) -> Option<Self> {
        let (offset, key) = {
            let font_ref = FontRef::from_index(&data, face_index)?;
            (font_ref.offset, font_ref.key)
        };
        Some(FontData {
            data: Arc::new(data),
            offset,
            key,
        })
    }

    /// Borrow a swash font reference for metrics and scaling.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }
}
