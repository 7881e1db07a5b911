mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{FixedPitchSurface, counting_invalidator};
use glyph_raster::{FillColor, RasterCache, RasterError, TextureFlags};

fn cache_with_counters() -> (
    RasterCache<FixedPitchSurface>,
    Arc<std::sync::atomic::AtomicUsize>,
    Arc<std::sync::atomic::AtomicUsize>,
) {
    let surface = FixedPitchSurface::new();
    let fills = surface.fill_counter();
    let (invalidations, invalidate) = counting_invalidator();
    let cache = RasterCache::with_current_runtime(surface, invalidate)
        .expect("tokio runtime is running");
    (cache, fills, invalidations)
}

#[tokio::test]
async fn test_repeated_get_returns_same_entry_and_rasterizes_once() {
    let (mut cache, fills, invalidations) = cache_with_counters();

    let first = cache.get(16, 0, "hello");
    let second = cache.get(16, 0, "hello");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(fills.load(Ordering::SeqCst), 1);
    // Bitmap conversion has not run yet: this task has not yielded.
    assert!(first.bitmap().is_none());
    assert!(first.is_pending());
    assert_eq!(first.width(), 35.0);

    let bitmap = first.ready().await.expect("bitmap produced");
    tokio::task::yield_now().await;

    assert!(Arc::ptr_eq(&second.bitmap().unwrap(), &bitmap));
    assert!(!second.is_pending());
    assert_eq!(invalidations.load(Ordering::SeqCst), 1);

    let third = cache.get(16, 0, "hello");
    tokio::task::yield_now().await;
    assert!(Arc::ptr_eq(&first, &third));
    assert_eq!(fills.load(Ordering::SeqCst), 1);
    assert_eq!(invalidations.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_bitmap_shape_and_flags() {
    let (mut cache, _fills, _invalidations) = cache_with_counters();

    // 3 chars at 9px (size 20 renders at 18px) = 27px wide.
    let entry = cache.get(20, 1, "abc");
    let bitmap = entry.ready().await.expect("bitmap produced");

    assert_eq!(bitmap.id, "20:1:abc");
    assert_eq!(bitmap.id, entry.key().as_str());
    assert_eq!((bitmap.width(), bitmap.height()), (27, 20));
    assert_eq!(bitmap.flags, TextureFlags::NO_MIPMAP | TextureFlags::CLAMP_TO_EDGE);
}

#[tokio::test]
async fn test_fractional_width_rounds_canvas_up() {
    let (mut cache, _fills, _invalidations) = cache_with_counters();

    // size 5 renders at 3px: 1.5px per char.
    let entry = cache.get(5, 0, "abc");
    assert_eq!(entry.width(), 4.5);
    let bitmap = entry.ready().await.expect("bitmap produced");
    assert_eq!((bitmap.width(), bitmap.height()), (5, 5));
}

#[tokio::test]
async fn test_empty_text_never_gets_bitmap() {
    let (mut cache, fills, invalidations) = cache_with_counters();

    let entry = cache.get(16, 0, "");
    assert_eq!(entry.width(), 0.0);
    assert!(!entry.is_pending());
    assert!(entry.ready().await.is_none());

    tokio::task::yield_now().await;
    assert!(entry.bitmap().is_none());
    assert_eq!(fills.load(Ordering::SeqCst), 0);
    assert_eq!(invalidations.load(Ordering::SeqCst), 0);
    assert!(cache.contains(16, 0, ""));
}

#[tokio::test]
async fn test_rasterized_width_keeps_color_codes() {
    let (mut cache, _fills, _invalidations) = cache_with_counters();

    let entry = cache.get(16, 0, "^1ab");
    assert_eq!(entry.width(), 28.0);
    assert_eq!(cache.measurer().measure_width(16, 0, "^1ab"), 14.0);
}

#[tokio::test]
async fn test_color_codes_are_cached_separately() {
    let (mut cache, _fills, invalidations) = cache_with_counters();

    let plain = cache.get(16, 0, "ab");
    let colored = cache.get(16, 0, "^1ab");
    assert!(!Arc::ptr_eq(&plain, &colored));
    assert_eq!(cache.len(), 2);

    plain.ready().await;
    colored.ready().await;
    tokio::task::yield_now().await;
    assert_eq!(invalidations.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_fill_color_reaches_surface() {
    let surface = FixedPitchSurface::new();
    let (_invalidations, invalidate) = counting_invalidator();
    let fill = FillColor {
        r: 10,
        g: 20,
        b: 30,
        a: 255,
    };
    let mut cache = RasterCache::with_current_runtime(surface, invalidate)
        .unwrap()
        .with_fill(fill);

    let bitmap = cache.get(16, 2, "x").ready().await.unwrap();
    assert_eq!(bitmap.pixels.get_pixel(0, 0).0, [10, 20, 30, 255]);
}

#[tokio::test]
async fn test_two_caches_measure_identically() {
    let (mut a, _, _) = cache_with_counters();
    let (mut b, _, _) = cache_with_counters();

    let from_a = a.get(18, 2, "determinism").ready().await.unwrap();
    let from_b = b.get(18, 2, "determinism").ready().await.unwrap();

    assert_eq!(
        a.get(18, 2, "determinism").width(),
        b.get(18, 2, "determinism").width()
    );
    assert_eq!(from_a.width(), from_b.width());
}

#[test]
fn test_cache_requires_runtime() {
    let (_invalidations, invalidate) = counting_invalidator();
    let result = RasterCache::with_current_runtime(FixedPitchSurface::new(), invalidate);
    assert!(matches!(result, Err(RasterError::RuntimeUnavailable(_))));
}

#[test]
fn test_explicit_runtime_handle() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let (invalidations, invalidate) = counting_invalidator();
    let mut cache = RasterCache::new(
        FixedPitchSurface::new(),
        invalidate,
        runtime.handle().clone(),
    );

    let entry = cache.get(16, 0, "off thread");
    assert!(entry.bitmap().is_none());

    let bitmap = runtime.block_on(entry.ready());
    assert!(bitmap.is_some());
    assert_eq!(invalidations.load(Ordering::SeqCst), 1);
}
