//! Single-file document patch.
//!
//! Applies the fixed layout-mode migration to one canvas content document:
//! bump `data.version`, then walk `data.canvas.rects` assigning the prescribed
//! `layoutMode` constant to every rect, piece, and cell piece. The file is
//! rewritten only when at least one field actually changed.
//!
//! A staged version bump is intentionally discarded when `canvas` turns out to
//! be missing or `rects` is malformed: the whole file is skipped and nothing
//! is written, matching the behavior this migration replaces.

use crate::error::MigrateError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Version string written to `data.version`.
pub const TARGET_VERSION: &str = "0.0.1";

/// Layout mode assigned to each rect.
pub const RECT_LAYOUT_MODE: i64 = 1;
/// Layout mode assigned to elements of `textPieces` and `imagePieces`.
pub const PIECE_LAYOUT_MODE: i64 = 0;
/// Layout mode assigned to a cell's `textPiece`.
pub const CELL_TEXT_LAYOUT_MODE: i64 = 1;
/// Layout mode assigned to a cell's `imagePiece`.
pub const CELL_IMAGE_LAYOUT_MODE: i64 = 0;

/// Why a document was skipped without being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File content is not valid JSON.
    ParseFailed,
    /// `data.canvas` is absent or empty.
    CanvasMissing,
    /// `canvas.rects` exists but is not an array.
    RectsNotAnArray,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::ParseFailed => write!(f, "not valid JSON"),
            SkipReason::CanvasMissing => write!(f, "'canvas' not found in data"),
            SkipReason::RectsNotAnArray => write!(f, "'rects' is not an array"),
        }
    }
}

/// Result of patching an in-memory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// At least one field changed; the document should be written back.
    Changed,
    /// Well-formed but already migrated; nothing to write.
    Clean,
    /// Structure missing or malformed; nothing may be written, even if a
    /// version bump was already staged in memory.
    Skipped(SkipReason),
}

/// Per-file outcome of [`process_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Skipped(SkipReason),
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Updated => write!(f, "updated"),
            FileOutcome::Unchanged => write!(f, "unchanged"),
            FileOutcome::Skipped(reason) => write!(f, "skipped ({})", reason),
        }
    }
}

/// Empty or zero-like values disqualify `canvas` the same way the previous
/// implementation's truthiness test did.
fn is_empty_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Set `layoutMode` on a mapping if it does not already hold `mode`.
/// Comparison is numeric, so a float-typed `1.0` already equals `1` and is
/// left alone rather than rewritten.
fn set_layout_mode(obj: &mut Map<String, Value>, mode: i64) -> bool {
    if obj.get("layoutMode").and_then(Value::as_f64) == Some(mode as f64) {
        return false;
    }
    obj.insert("layoutMode".to_string(), Value::from(mode));
    true
}

/// Apply the per-rect edits. Non-array piece/cell lists and non-mapping
/// elements are skipped silently; each edit is independent.
fn patch_rect(rect: &mut Value) -> bool {
    let Some(rect) = rect.as_object_mut() else {
        return false;
    };
    let mut modified = set_layout_mode(rect, RECT_LAYOUT_MODE);

    for key in ["textPieces", "imagePieces"] {
        if let Some(Value::Array(pieces)) = rect.get_mut(key) {
            for piece in pieces {
                if let Some(piece) = piece.as_object_mut() {
                    modified |= set_layout_mode(piece, PIECE_LAYOUT_MODE);
                }
            }
        }
    }

    if let Some(Value::Array(cells)) = rect.get_mut("cells") {
        for cell in cells {
            let Some(cell) = cell.as_object_mut() else {
                continue;
            };
            if let Some(Value::Object(text_piece)) = cell.get_mut("textPiece") {
                modified |= set_layout_mode(text_piece, CELL_TEXT_LAYOUT_MODE);
            }
            if let Some(Value::Object(image_piece)) = cell.get_mut("imagePiece") {
                modified |= set_layout_mode(image_piece, CELL_IMAGE_LAYOUT_MODE);
            }
        }
    }

    modified
}

/// Patch a parsed document in place.
///
/// Edits are applied in a fixed order: version bump first, then the rect walk.
/// When the canvas/rects structure is malformed the status is `Skipped` and
/// the caller must not write the document back, discarding any staged edit.
pub fn patch_document(path: &Path, doc: &mut Value) -> DocumentStatus {
    let mut modified = false;

    match doc.get_mut("data") {
        Some(Value::Object(data)) => {
            let current = data.get("version").and_then(Value::as_str);
            if current != Some(TARGET_VERSION) {
                data.insert(
                    "version".to_string(),
                    Value::String(TARGET_VERSION.to_string()),
                );
                modified = true;
            }
        }
        _ => {
            warn!(
                path = %path.display(),
                "skipping version update: 'data' is not a mapping"
            );
        }
    }

    let canvas_present = doc
        .get("data")
        .and_then(|data| data.get("canvas"))
        .is_some_and(|canvas| !is_empty_like(canvas));
    if !canvas_present {
        return DocumentStatus::Skipped(SkipReason::CanvasMissing);
    }

    if let Some(canvas) = doc.get_mut("data").and_then(|data| data.get_mut("canvas")) {
        match canvas.get_mut("rects") {
            Some(Value::Array(rects)) => {
                for rect in rects {
                    modified |= patch_rect(rect);
                }
            }
            Some(_) => return DocumentStatus::Skipped(SkipReason::RectsNotAnArray),
            // Missing rects: nothing to edit, but a staged version bump
            // still counts as a change.
            None => debug!(path = %path.display(), "no 'rects' in canvas"),
        }
    }

    if modified {
        DocumentStatus::Changed
    } else {
        DocumentStatus::Clean
    }
}

/// Parse raw file content, attributing failures to the file.
fn parse_document(path: &Path, raw: &str) -> Result<Value, MigrateError> {
    serde_json::from_str(raw).map_err(|e| MigrateError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read, patch, and (when changed) rewrite a single document file.
///
/// Parse failures and structural problems produce a `Skipped` outcome and
/// leave the file untouched. Write errors propagate to the caller, which
/// catches them at the per-file boundary. With `dry_run` the outcome is
/// computed but nothing is written.
pub fn process_file(path: &Path, dry_run: bool) -> Result<FileOutcome, MigrateError> {
    let raw = fs::read_to_string(path)?;
    let mut doc = match parse_document(path, &raw) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "skipping: {}", SkipReason::ParseFailed);
            return Ok(FileOutcome::Skipped(SkipReason::ParseFailed));
        }
    };

    match patch_document(path, &mut doc) {
        DocumentStatus::Skipped(reason) => {
            warn!(path = %path.display(), "skipping: {}", reason);
            Ok(FileOutcome::Skipped(reason))
        }
        DocumentStatus::Clean => Ok(FileOutcome::Unchanged),
        DocumentStatus::Changed => {
            if !dry_run {
                // Two-space indent; serde_json leaves non-ASCII unescaped.
                let serialized =
                    serde_json::to_string_pretty(&doc).map_err(|e| MigrateError::Serialize {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                fs::write(path, serialized)?;
            }
            Ok(FileOutcome::Updated)
        }
    }
}
