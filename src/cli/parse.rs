//! CLI parse: clap types for relayout. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relayout CLI - batch layout-mode migration for canvas content documents
#[derive(Parser)]
#[command(name = "relayout")]
#[command(about = "Batch layout-mode migration for canvas content documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root directory to scan for migration targets (overrides configuration)
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable all log output
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (implies file output unless --log-output is given)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply the migration to every candidate document
    Run {
        /// Report outcomes without writing any file
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List candidate documents without touching them
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
