//! Console and persistent file logging for the operator binary
//!
//! Library code logs through `log`; the subscriber installed here picks those
//! records up as well as `tracing` events and writes them to stdout and to a
//! daily-rotated file under the base directory.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::IngestConfig;

/// Daily-rotated appender for `config.log_file_path()`.
///
/// `scraping_log.txt` becomes `scraping_log.2026-01-31.txt`; only the newest
/// `log_max_files` files are kept.
pub fn rolling_log_appender(config: &IngestConfig) -> Result<RollingFileAppender> {
    let path = config.log_file_path();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| std::path::PathBuf::from("."), std::path::Path::to_path_buf);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let prefix = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .context("Log file has no name")?;

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(config.log_max_files());
    if let Some(extension) = path.extension() {
        builder = builder.filename_suffix(extension.to_string_lossy().into_owned());
    }

    builder
        .build(&dir)
        .with_context(|| format!("Failed to open log file in {}", dir.display()))
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`), stdout,
/// and the rolling file when it can be opened.
///
/// The returned guard flushes the file writer on drop and must be held until
/// the process exits.
pub fn init_logging(config: &IngestConfig) -> Option<WorkerGuard> {
    let (file_layer, guard, file_error) = match rolling_log_appender(config) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if let Some(e) = file_error {
        tracing::warn!("Logging to stdout only: {e:#}");
    }
    guard
}
