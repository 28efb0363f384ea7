//! Candidate file discovery.
//!
//! Enumerates immediate subdirectories of the migration root whose name
//! starts with the configured prefix and keeps those containing the expected
//! document file. No recursion beyond one level.

use crate::error::MigrateError;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

/// A directory that matched the naming convention and contains the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Subdirectory name (e.g. `sy_album_01`).
    pub dir_name: String,
    /// Full path to the document file inside it.
    pub file_path: PathBuf,
}

/// Candidate discovery over a root directory.
pub struct Discovery {
    root: PathBuf,
    dir_prefix: String,
    file_name: String,
}

impl Discovery {
    pub fn new(root: PathBuf, dir_prefix: String, file_name: String) -> Self {
        Self {
            root,
            dir_prefix,
            file_name,
        }
    }

    /// Collect candidate document paths.
    ///
    /// Returns candidates sorted by path for determinism. A missing root or a
    /// root with no matching subdirectories yields an empty list, not an
    /// error.
    pub fn candidates(&self) -> Result<Vec<Candidate>, MigrateError> {
        if !self.root.is_dir() {
            debug!(root = %self.root.display(), "migration root does not exist");
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = entry.map_err(|e| {
                MigrateError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to list {}: {}", self.root.display(), e),
                ))
            })?;

            if !entry.file_type().is_dir() {
                continue;
            }
            let dir_name = entry.file_name().to_string_lossy().to_string();
            if !dir_name.starts_with(&self.dir_prefix) {
                continue;
            }

            let file_path = entry.path().join(&self.file_name);
            if file_path.is_file() {
                candidates.push(Candidate {
                    dir_name,
                    file_path,
                });
            } else {
                debug!(dir = %entry.path().display(), "no {} in directory", self.file_name);
            }
        }

        candidates.sort_by(|a, b| a.file_path.cmp(&b.file_path));
        Ok(candidates)
    }
}
