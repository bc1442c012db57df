//! Tracing setup for the binary.
//!
//! stdout carries the command stream, so human-readable logs always go to
//! stderr. When a log directory is configured, the same events are also
//! appended to `<dir>/boomer.log` through a non-blocking writer.
use std::path::Path;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "boomer.log";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info` when it is unset
/// or holds no valid directive. The returned guard flushes the file writer on
/// drop and must be held until the session ends.
pub fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = build_filter(&std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}", dir.join(LOG_FILE_NAME).display());
    }

    Ok(guard)
}

/// Parses `RUST_LOG`-style directives; invalid ones are skipped.
fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        assert_eq!(build_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn global_level_is_honored() {
        assert_eq!(build_filter("trace").max_level_hint(), Some(LevelFilter::TRACE));
        assert_eq!(build_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn target_directives_are_kept() {
        let filter = build_filter("runtime=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(filter.to_string().contains("runtime=debug"));
    }
}
