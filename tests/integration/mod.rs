//! Integration test modules and shared fixtures.

mod cli_run;
mod migration_run;

use std::fs;
use std::path::{Path, PathBuf};

/// Create `<root>/<dir>/content.json` with the given content and return its path.
pub fn write_candidate(root: &Path, dir: &str, content: &str) -> PathBuf {
    let dir_path = root.join(dir);
    fs::create_dir_all(&dir_path).unwrap();
    let file_path = dir_path.join("content.json");
    fs::write(&file_path, content).unwrap();
    file_path
}
