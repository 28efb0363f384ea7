//! Migration run loop.
//!
//! Sequential, single-threaded pass over the discovered candidates. Every
//! per-file error is caught here, logged, and recorded in the summary; no
//! per-file outcome aborts the run.

use crate::config::MigrateConfig;
use crate::discover::Discovery;
use crate::error::MigrateError;
use crate::patch::{process_file, FileOutcome, SkipReason};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Final state of one file after a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Updated,
    Unchanged,
    Skipped(SkipReason),
    Failed(String),
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportStatus::Updated => write!(f, "updated"),
            ReportStatus::Unchanged => write!(f, "unchanged"),
            ReportStatus::Skipped(reason) => write!(f, "skipped ({})", reason),
            ReportStatus::Failed(err) => write!(f, "failed ({})", err),
        }
    }
}

/// One line per processed file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: ReportStatus,
}

/// Serializable result of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root_dir: PathBuf,
    pub dry_run: bool,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.files.len()
    }
}

/// Run the migration over every candidate under the configured root.
///
/// Only discovery failures (the root listing itself erroring) surface as
/// `Err`; per-file read/parse/write problems are absorbed into the summary.
pub fn run_migration(config: &MigrateConfig, dry_run: bool) -> Result<RunSummary, MigrateError> {
    let discovery = Discovery::new(
        config.root_dir.clone(),
        config.dir_prefix.clone(),
        config.file_name.clone(),
    );
    let candidates = discovery.candidates()?;
    info!(
        root = %config.root_dir.display(),
        count = candidates.len(),
        dry_run,
        "starting migration run"
    );

    let mut summary = RunSummary {
        root_dir: config.root_dir.clone(),
        dry_run,
        updated: 0,
        unchanged: 0,
        skipped: 0,
        failed: 0,
        files: Vec::with_capacity(candidates.len()),
    };

    for candidate in candidates {
        let status = match process_file(&candidate.file_path, dry_run) {
            Ok(FileOutcome::Updated) => {
                info!(path = %candidate.file_path.display(), "updated");
                summary.updated += 1;
                ReportStatus::Updated
            }
            Ok(FileOutcome::Unchanged) => {
                info!(path = %candidate.file_path.display(), "no changes needed");
                summary.unchanged += 1;
                ReportStatus::Unchanged
            }
            Ok(FileOutcome::Skipped(reason)) => {
                // process_file already logged the diagnostic with detail.
                summary.skipped += 1;
                ReportStatus::Skipped(reason)
            }
            Err(e) => {
                error!(path = %candidate.file_path.display(), error = %e, "file failed");
                summary.failed += 1;
                ReportStatus::Failed(e.to_string())
            }
        };
        summary.files.push(FileReport {
            path: candidate.file_path,
            status,
        });
    }

    if summary.failed > 0 {
        warn!(failed = summary.failed, "run completed with failures");
    } else {
        info!(
            updated = summary.updated,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            "run completed"
        );
    }
    Ok(summary)
}
