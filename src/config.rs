//! Configuration system.
//!
//! Layered configuration for the migration run: built-in defaults, then the
//! global config file, then a root-local `relayout.toml`, then `RELAYOUT_*`
//! environment variables. An explicit `--config FILE` bypasses the layering.

use crate::error::MigrateError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrateConfig {
    /// Directory to scan for subdirectories matching the migration target.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Prefix a subdirectory name must start with to be considered.
    #[serde(default = "default_dir_prefix")]
    pub dir_prefix: String,

    /// Document file name expected inside each matching subdirectory.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_dir_prefix() -> String {
    "sy_".to_string()
}

fn default_file_name() -> String {
    "content.json".to_string()
}

impl Default for MigrateConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            dir_prefix: default_dir_prefix(),
            file_name: default_file_name(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MigrateConfig {
    /// Validate the loaded configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.root_dir.as_os_str().is_empty() {
            return Err("root_dir cannot be empty".to_string());
        }
        if self.file_name.is_empty() {
            return Err("file_name cannot be empty".to_string());
        }
        if self.file_name.contains(std::path::MAIN_SEPARATOR) {
            return Err(format!(
                "file_name must be a bare file name, got '{}'",
                self.file_name
            ));
        }
        Ok(())
    }
}

/// Loads configuration from files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path to the global config file: `~/.config/relayout/config.toml`.
    pub fn global_config_path() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("relayout")
                .join("config.toml")
        })
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("root_dir", ".")?
            .set_default("dir_prefix", "sy_")?
            .set_default("file_name", "content.json")
    }

    /// Load layered configuration.
    ///
    /// Precedence (lowest to highest): defaults, global file, `<cwd>/relayout.toml`,
    /// `RELAYOUT_*` environment variables (e.g. `RELAYOUT_ROOT_DIR`).
    pub fn load(cwd: &Path) -> Result<MigrateConfig, MigrateError> {
        let mut builder = Self::builder_with_defaults()
            .map_err(|e| MigrateError::Config(e.to_string()))?;

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(
                    File::from(global_path.as_path()).required(false),
                );
            } else {
                warn!(
                    config_path = %global_path.display(),
                    "global configuration file not found; using defaults"
                );
            }
        }

        let local_path = cwd.join("relayout.toml");
        if local_path.exists() {
            builder = builder.add_source(File::from(local_path.as_path()).required(false));
        }

        builder = builder.add_source(Environment::with_prefix("RELAYOUT").separator("__"));

        let config: MigrateConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| MigrateError::Config(e.to_string()))?;
        config.validate().map_err(MigrateError::Config)?;
        Ok(config)
    }

    /// Load configuration from a single explicit file, skipping layering.
    pub fn load_from_file(path: &Path) -> Result<MigrateConfig, MigrateError> {
        let config: MigrateConfig = Self::builder_with_defaults()
            .map_err(|e| MigrateError::Config(e.to_string()))?
            .add_source(File::from(path).required(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| MigrateError::Config(e.to_string()))?;
        config.validate().map_err(MigrateError::Config)?;
        Ok(config)
    }
}
