use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub(crate) enum LogTarget {
    /// CLI runs log to stderr so stdout stays clean for command output.
    Stderr,
    /// The TUI owns the terminal, so logs are appended to a file instead.
    File(PathBuf),
}

/// `RUST_LOG` takes precedence over `default_filter` from the config file.
pub(crate) fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub(crate) fn init(default_filter: &str, target: LogTarget) -> Result<()> {
    let filter = build_filter(default_filter);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Could not open log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Arc::new(log_file))
                .try_init()
        }
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
