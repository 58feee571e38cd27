//! Diagnostic logging support for patx
//!
//! The library only emits `tracing` events. Applications that want to see
//! them can install a subscriber here: stderr by default, or appended to the
//! file named in the logging config. RUST_LOG takes precedence over the
//! configured level.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

use crate::config::LoggingConfig;

/// Build the filter: RUST_LOG if set and valid, else `patx=<level>`
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(config))
}

/// Filter for the configured level only, ignoring RUST_LOG
pub fn level_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(format!("patx={}", config.level.to_lowercase()))
}

/// Initialize the global tracing subscriber
///
/// Returns the log file path when logging goes to a file. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let filter = env_filter(config);

    let Some(log_path) = config.file.clone() else {
        let subscriber = registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter);
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let subscriber = registry()
        .with(
            fmt::layer()
                .with_writer(log_file)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(Some(log_path))
}
