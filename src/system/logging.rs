//! Logging system initialization
//!
//! This module provides functions to initialize the tracing/logging system
//! based on application configuration.

use anyhow::{Context, Result};
use tracing_appender::rolling;

use crate::config::{LoggingConfig, StaticConfig};

/// Where log lines go, decided from `[logging]`.
#[derive(Debug, PartialEq, Eq)]
enum LogTarget<'a> {
    Stdout,
    Rolling {
        dir: &'a std::path::Path,
        prefix: &'a str,
    },
    File(&'a str),
}

fn log_target(logging: &LoggingConfig) -> LogTarget<'_> {
    match logging.file.as_deref() {
        Some(file) if !file.is_empty() && logging.enable_rotation => {
            let path = std::path::Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(std::path::Path::new("."));
            let prefix = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("dailyqr.log")
                .trim_end_matches(".log");
            LogTarget::Rolling { dir, prefix }
        }
        Some(file) if !file.is_empty() => LogTarget::File(file),
        _ => LogTarget::Stdout,
    }
}

/// Initialize logging system based on configuration
///
/// Sets up file output, daily rotation and formatting. Must be called once,
/// after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &StaticConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let writer: Box<dyn std::io::Write + Send + Sync> = match log_target(&config.logging) {
        LogTarget::Rolling { dir, prefix } => {
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .max_log_files(config.logging.max_backups as usize)
                .build(dir)
                .context("Failed to create rolling log appender")?;
            Box::new(appender)
        }
        LogTarget::File(file) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .with_context(|| format!("Failed to open log file {}", file))?;
            Box::new(file)
        }
        LogTarget::Stdout => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_target(&config.logging) == LogTarget::Stdout);

    if config.logging.format == "json" {
        subscriber_builder
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    } else {
        subscriber_builder
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    }

    Ok(guard)
}
