//! `log` facade bridge for the glyph-raster binary.
//!
//! Level is taken from the `--log-level` flag, else the `GLYPH_RASTER_LOG`
//! environment variable:
//! - 0 or unset: Off
//! - 1: Errors only
//! - 2: Info level (font loads, fallbacks)
//! - 3: Debug level (raster jobs)
//! - 4: Trace level (cache hits)
//!
//! Output goes to `glyph_raster_debug.log` in the temp directory so it never
//! mixes with command output. When `RUST_LOG` is set, lines are mirrored to
//! stderr as well.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Parse a numeric or named level ("2", "info", ...).
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "0" | "off" => Some(LevelFilter::Off),
        "1" | "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "2" | "info" => Some(LevelFilter::Info),
        "3" | "debug" => Some(LevelFilter::Debug),
        "4" | "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn level_from_env() -> LevelFilter {
    std::env::var("GLYPH_RASTER_LOG")
        .ok()
        .and_then(|val| parse_level(&val))
        .unwrap_or(LevelFilter::Off)
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("glyph_raster_debug.log")
}

struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Install the logger. `level_override` wins over the environment.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level_override: Option<LevelFilter>) {
    let level = level_override.unwrap_or_else(level_from_env);
    let mirror_stderr = std::env::var_os("RUST_LOG").is_some();

    // Silently skip the file if it can't be opened; stderr mirroring still works.
    let file = if level != LevelFilter::Off {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok()
    } else {
        None
    };

    let logger = FileLogger {
        level,
        file: Mutex::new(file),
        mirror_stderr,
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
        log::info!("glyph-raster debug session started (level={:?})", level);
    }
}
