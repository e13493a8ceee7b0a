//! File-backed logging sink with an explicit lifecycle.
//!
//! Log records (timestamp, level, message, structured fields) are appended
//! to a log file through a non-blocking writer. The returned guard owns the
//! writer's worker thread: the caller holds it for the run's lifetime and
//! dropping it flushes any buffered records. This keeps the sink an
//! explicitly constructed object rather than ambient mutable state - only
//! the subscriber registration itself is process-global, set exactly once.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber writing to `log_file`.
///
/// The file is opened in append mode so successive runs accumulate into the
/// same log. `default_level` applies when `RUST_LOG` is not set.
///
/// Returns the worker guard; hold it until the process exits so buffered
/// records are flushed.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(log_file: &Path, default_level: &str) -> anyhow::Result<WorkerGuard> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("cannot open log file {}", log_file.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
