//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::dirs;

/// Log to stderr, and to a daily-rolling file when `PVE_LOG_TO_FILE` is set.
///
/// The filter defaults to `info` and is overridden by `RUST_LOG`. The
/// returned guard flushes the file writer on drop; hold it for the life of
/// the process.
pub fn setup_logging() -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = if log_to_file() {
        let log_dir = dirs::log_dir();
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let file_appender = tracing_appender::rolling::daily(&log_dir, "client.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if guard.is_some() {
        tracing::debug!(dir = %dirs::log_dir().display(), "File logging enabled");
    }

    Ok(guard)
}

fn log_to_file() -> bool {
    matches!(
        std::env::var("PVE_LOG_TO_FILE").map(|v| v.to_lowercase()).as_deref(),
        Ok("true" | "1" | "yes" | "on")
    )
}
