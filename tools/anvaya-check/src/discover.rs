use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::debug;
use walkdir::WalkDir;

pub const VALID_STRINGS_FILE: &str = "valid_strings.txt";

pub fn is_table(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsv") | Some("csv")
    )
}

/// Expands directories (one level, sorted by name) into their table files.
/// Explicit file arguments are taken as given.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_table(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("{} does not exist", path.display());
        }
    }

    debug!(count = files.len(), "table files discovered");
    Ok(files)
}

/// `valid_strings.txt` beside the first input.
pub fn default_valid_strings(paths: &[PathBuf]) -> PathBuf {
    let base = match paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) => p.parent().map(Path::to_path_buf).unwrap_or_default(),
        None => PathBuf::from("."),
    };
    base.join(VALID_STRINGS_FILE)
}
