//! CLI presentation: text formatters for run summaries and candidate lists.

use crate::discover::Candidate;
use crate::run::{ReportStatus, RunSummary};
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::Path;

/// Text rendering of a run summary: one line per file plus totals.
pub fn format_run_summary_text(summary: &RunSummary) -> String {
    let mut s = if summary.dry_run {
        format!("Migration dry run over {}:", summary.root_dir.display())
    } else {
        format!("Migration run over {}:", summary.root_dir.display())
    };

    if summary.files.is_empty() {
        s.push_str("\n  No candidate documents found.");
        return s;
    }

    for report in &summary.files {
        let status = match &report.status {
            ReportStatus::Updated => report.status.to_string().green().to_string(),
            ReportStatus::Unchanged => report.status.to_string(),
            ReportStatus::Skipped(_) => report.status.to_string().yellow().to_string(),
            ReportStatus::Failed(_) => report.status.to_string().red().to_string(),
        };
        s.push_str(&format!("\n  {}: {}", report.path.display(), status));
    }

    s.push_str(&format!(
        "\n\n{} file(s): {} updated, {} unchanged, {} skipped, {} failed",
        summary.total(),
        summary.updated,
        summary.unchanged,
        summary.skipped,
        summary.failed
    ));
    s
}

/// Table rendering of the candidate list.
pub fn format_candidates_text(root_dir: &Path, candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return format!("No candidate documents under {}.", root_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec!["Directory", "Document"]);
    for candidate in candidates {
        table.add_row(vec![
            candidate.dir_name.clone(),
            candidate.file_path.display().to_string(),
        ]);
    }
    format!(
        "Candidates under {} ({}):\n{}",
        root_dir.display(),
        candidates.len(),
        table
    )
}
