//! Keyed cache of rasterized strings.
//!
//! [`RasterCache::get`] never blocks. The first request for a key measures
//! the text, registers an entry, fills a canvas, and schedules the bitmap
//! conversion on the async runtime; every later request for the key returns
//! the same entry, finished or not. When a bitmap is attached the
//! invalidation callback fires once for that key.
//!
//! Entries are never evicted.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use glyph_raster_config::FillColor;
use glyph_raster_fonts::resolve;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::bitmap::Bitmap;
use crate::error::RasterError;
use crate::measurer::TextMeasurer;
use crate::surface::{Canvas, DrawingSurface};

/// Redraw signal invoked when a bitmap becomes available.
pub type InvalidateFn = Arc<dyn Fn() + Send + Sync>;

/// `size:font_id:text`, with the text exactly as requested.
///
/// Color codes are part of the key, so strings that differ only in codes
/// are cached separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(size: i32, font_id: i32, text: &str) -> Self {
        CacheKey(format!("{size}:{font_id}:{text}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Measured width plus a bitmap that arrives later, or never.
pub struct CacheEntry {
    key: CacheKey,
    width: f32,
    /// Whether a raster job was started for this entry
    rasterized: bool,
    bitmap: watch::Sender<Option<Arc<Bitmap>>>,
}

impl CacheEntry {
    fn new(key: CacheKey, width: f32, rasterized: bool) -> Self {
        let (bitmap, _) = watch::channel(None);
        Self {
            key,
            width,
            rasterized,
            bitmap,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Width of the full text, color codes included.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// The bitmap, if it has been produced.
    pub fn bitmap(&self) -> Option<Arc<Bitmap>> {
        self.bitmap.borrow().clone()
    }

    /// True while a raster job is in flight.
    pub fn is_pending(&self) -> bool {
        self.rasterized && self.bitmap.borrow().is_none()
    }

    /// Wait for the bitmap.
    ///
    /// Resolves immediately with `None` for entries that will never get one
    /// (zero width).
    pub async fn ready(&self) -> Option<Arc<Bitmap>> {
        if !self.rasterized {
            return None;
        }
        let mut rx = self.bitmap.subscribe();
        let bitmap = match rx.wait_for(Option::is_some).await {
            Ok(bitmap) => Option::clone(&bitmap),
            Err(_) => None,
        };
        bitmap
    }

    /// Attach `bitmap` unless one is already present. Returns whether it was attached.
    fn attach(&self, bitmap: Arc<Bitmap>) -> bool {
        self.bitmap.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(bitmap);
            true
        })
    }
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("pending", &self.is_pending())
            .field("bitmap", &self.bitmap())
            .finish()
    }
}

/// Raster cache over a drawing surface.
///
/// Owned by a single logical thread; bitmap conversion runs as tasks on
/// `runtime` and only touches the entry it completes.
pub struct RasterCache<S> {
    measurer: TextMeasurer<S>,
    entries: HashMap<CacheKey, Arc<CacheEntry>>,
    fill: FillColor,
    invalidate: InvalidateFn,
    runtime: Handle,
}

impl<S: DrawingSurface> RasterCache<S> {
    pub fn new(
        surface: S,
        invalidate: impl Fn() + Send + Sync + 'static,
        runtime: Handle,
    ) -> Self {
        Self {
            measurer: TextMeasurer::new(surface),
            entries: HashMap::new(),
            fill: FillColor::WHITE,
            invalidate: Arc::new(invalidate),
            runtime,
        }
    }

    /// Create a cache that schedules bitmap conversion on the ambient tokio runtime.
    pub fn with_current_runtime(
        surface: S,
        invalidate: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self, RasterError> {
        let runtime = Handle::try_current()?;
        Ok(Self::new(surface, invalidate, runtime))
    }

    pub fn with_fill(mut self, fill: FillColor) -> Self {
        self.fill = fill;
        self
    }

    /// The uncached measurer sharing this cache's surface.
    pub fn measurer(&mut self) -> &mut TextMeasurer<S> {
        &mut self.measurer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, size: i32, font_id: i32, text: &str) -> bool {
        self.entries.contains_key(&CacheKey::new(size, font_id, text))
    }

    /// Return the entry for `(size, font_id, text)`, starting a raster job
    /// on first request.
    pub fn get(&mut self, size: i32, font_id: i32, text: &str) -> Arc<CacheEntry> {
        let key = CacheKey::new(size, font_id, text);
        if let Some(entry) = self.entries.get(&key) {
            log::trace!("Raster cache hit: {}", key);
            return Arc::clone(entry);
        }

        let font = resolve(size, font_id);
        let width = self.measurer.measure_raw(&font, text);
        let rasterized = width > 0.0 && size > 0;
        let entry = Arc::new(CacheEntry::new(key.clone(), width, rasterized));
        self.entries.insert(key, Arc::clone(&entry));

        if rasterized {
            let canvas_width = width.ceil() as u32;
            let canvas_height = size as u32;
            log::debug!(
                "Rasterizing '{}' at {} ({}x{})",
                entry.key(),
                font,
                canvas_width,
                canvas_height
            );
            let canvas = self.measurer.surface_mut().fill_text(
                &font,
                text,
                canvas_width,
                canvas_height,
                self.fill,
            );
            self.spawn_bitmap(Arc::clone(&entry), canvas);
        }

        entry
    }

    fn spawn_bitmap(&self, entry: Arc<CacheEntry>, canvas: Canvas) {
        let invalidate = Arc::clone(&self.invalidate);
        self.runtime.spawn(async move {
            let bitmap = Bitmap::from_canvas(entry.key().as_str(), canvas);
            if entry.attach(Arc::new(bitmap)) {
                log::debug!("Bitmap ready for '{}'", entry.key());
                (*invalidate)();
            }
        });
    }
}
