//! Logging system.
//!
//! Structured logging over the `tracing` crate. Precedence for every setting
//! (highest to lowest): CLI flags, `RELAYOUT_LOG*` environment variables,
//! configuration file, defaults.

use crate::error::MigrateError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; `--quiet` turns logging off entirely.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, stdout, file (default: stderr, so
    /// `--format json` command output stays clean on stdout)
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (used when output is "file")
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("relayout.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
        }
    }
}

/// Initialize the logging system for the process.
pub fn init_logging(config: &LoggingConfig) -> Result<(), MigrateError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config);
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let base_subscriber = Registry::default().with(filter);

    match (format.as_str(), output.as_str()) {
        ("json", "file") => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(open_log_file(config)?),
            )
            .init(),
        (_, "file") => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(open_log_file(config)?),
            )
            .init(),
        ("json", "stdout") => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stdout),
            )
            .init(),
        ("json", _) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .init(),
        (_, "stdout") => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stdout),
            )
            .init(),
        _ => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    Ok(())
}

/// Open the configured log file for appending, creating parent directories.
fn open_log_file(config: &LoggingConfig) -> Result<Arc<fs::File>, MigrateError> {
    let path = config.file.clone().unwrap_or_else(default_log_file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                MigrateError::Config(format!("Failed to create log directory: {}", e))
            })?;
        }
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            MigrateError::Config(format!("Failed to open log file {:?}: {}", path, e))
        })?;
    Ok(Arc::new(file))
}

/// Build the level filter from `RELAYOUT_LOG` or the config.
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("RELAYOUT_LOG") {
        return filter;
    }
    EnvFilter::new(config.level.as_str())
}

/// Determine output format from environment or config.
fn determine_format(config: &LoggingConfig) -> Result<String, MigrateError> {
    if let Ok(format) = std::env::var("RELAYOUT_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    if config.format != "json" && config.format != "text" {
        return Err(MigrateError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            config.format
        )));
    }
    Ok(config.format.clone())
}

/// Determine output destination from environment or config.
fn determine_output(config: &LoggingConfig) -> Result<String, MigrateError> {
    let output = std::env::var("RELAYOUT_LOG_OUTPUT").unwrap_or_else(|_| config.output.clone());
    match output.as_str() {
        "stdout" | "stderr" | "file" => Ok(output),
        _ => Err(MigrateError::Config(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
