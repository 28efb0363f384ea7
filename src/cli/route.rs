//! CLI route: run context and route table. Dispatches to the run and
//! discovery services and hands results to presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_candidates_text, format_run_summary_text};
use crate::config::{ConfigLoader, MigrateConfig};
use crate::discover::Discovery;
use crate::error::MigrateError;
use crate::run::run_migration;
use serde_json::json;
use std::path::PathBuf;

/// Runtime context for CLI execution: the resolved configuration.
/// Built from the optional `--root-dir` and `--config` flags using
/// ConfigLoader only.
pub struct RunContext {
    config: MigrateConfig,
}

impl RunContext {
    /// Create a run context. An explicit config file path bypasses layered
    /// loading; an explicit root dir overrides whatever was loaded.
    pub fn new(
        root_dir: Option<PathBuf>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, MigrateError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            let cwd = std::env::current_dir()?;
            ConfigLoader::load(&cwd)?
        };

        if let Some(root) = root_dir {
            config.root_dir = root;
        }
        config.validate().map_err(MigrateError::Config)?;

        Ok(Self { config })
    }

    /// Resolved configuration for this invocation.
    pub fn config(&self) -> &MigrateConfig {
        &self.config
    }

    /// Execute a CLI command via the route table.
    pub fn execute(&self, command: &Commands) -> Result<String, MigrateError> {
        match command {
            Commands::Run { dry_run, format } => {
                let summary = run_migration(&self.config, *dry_run)?;
                if format == "json" {
                    serde_json::to_string_pretty(&summary).map_err(|e| {
                        MigrateError::Config(format!("Failed to render JSON output: {}", e))
                    })
                } else {
                    Ok(format_run_summary_text(&summary))
                }
            }
            Commands::List { format } => {
                let discovery = Discovery::new(
                    self.config.root_dir.clone(),
                    self.config.dir_prefix.clone(),
                    self.config.file_name.clone(),
                );
                let candidates = discovery.candidates()?;
                if format == "json" {
                    let out = json!({
                        "root_dir": self.config.root_dir,
                        "candidates": candidates
                            .iter()
                            .map(|c| json!({ "dir": c.dir_name, "path": c.file_path }))
                            .collect::<Vec<_>>(),
                    });
                    serde_json::to_string_pretty(&out).map_err(|e| {
                        MigrateError::Config(format!("Failed to render JSON output: {}", e))
                    })
                } else {
                    Ok(format_candidates_text(&self.config.root_dir, &candidates))
                }
            }
        }
    }
}
