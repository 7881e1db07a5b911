use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use glyph_raster::cli::{self, Cli, Commands};
use glyph_raster::{Config, FontRegistry, RasterCache, SwashSurface, TextMeasurer, logging};
use tokio::runtime::Builder;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level_override = match cli.log_level.as_deref() {
        Some(value) => Some(
            logging::parse_level(value)
                .with_context(|| format!("invalid --log-level '{value}'"))?,
        ),
        None => None,
    };
    logging::init(level_override);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Fonts must be in place before the first measurement. A failed load
    // degrades to system fallback faces rather than aborting.
    let registry = Arc::new(FontRegistry::from_config(&config));
    if let Err(e) = registry.load_configured(&config) {
        log::warn!("Font loading failed: {e}");
        eprintln!("glyph-raster: warning: {e}; falling back to system fonts");
    }
    let surface = SwashSurface::new(registry)?;

    match cli.command {
        Commands::Measure { text } => {
            let mut measurer = TextMeasurer::new(surface);
            let width = measurer.measure_width(text.size, text.font, &text.text);
            println!("{width}");
        }
        Commands::Cursor {
            text,
            cursor_x,
            cursor_y,
        } => {
            let mut measurer = TextMeasurer::new(surface);
            let index = measurer.measure_cursor_index(
                text.size,
                text.font,
                &cli::unescape_newlines(&text.text),
                cursor_x,
                cursor_y,
            );
            println!("{index}");
        }
        Commands::Render { text, out } => {
            // Single-threaded, like the frame loop the cache normally serves.
            let runtime = Builder::new_current_thread().enable_all().build()?;
            let invalidations = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&invalidations);
            let mut cache = RasterCache::new(
                surface,
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                },
                runtime.handle().clone(),
            )
            .with_fill(config.fill_color);

            let entry = cache.get(text.size, text.font, &text.text);
            let Some(bitmap) = runtime.block_on(entry.ready()) else {
                anyhow::bail!("'{}' has zero width; nothing to render", text.text);
            };
            bitmap
                .to_straight_alpha()
                .save(&out)
                .with_context(|| format!("failed to write {}", out.display()))?;
            log::info!(
                "Rendered '{}' ({} invalidation(s))",
                bitmap.id,
                invalidations.load(Ordering::SeqCst)
            );
            println!(
                "{} {}x{} -> {}",
                entry.width(),
                bitmap.width(),
                bitmap.height(),
                out.display()
            );
        }
    }

    Ok(())
}
