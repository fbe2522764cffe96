//! File discovery for `vox check`.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: BTreeSet<PathBuf>,
    /// Roots given on the command line that do not exist.
    pub missing: Vec<PathBuf>,
}

/// Collect the files to check.
///
/// Files named directly are always included. Directories are walked and
/// their files kept when the path relative to the directory matches an
/// include pattern and no ignore pattern.
pub fn scan_files(roots: &[PathBuf], includes: &[Pattern], ignores: &[Pattern]) -> ScanResult {
    let mut result = ScanResult::default();

    for root in roots {
        if root.is_file() {
            result.files.insert(root.clone());
            continue;
        }
        if !root.is_dir() {
            result.missing.push(root.clone());
            continue;
        }

        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("cannot access path: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if is_selected(relative, includes, ignores) {
                result.files.insert(path.to_path_buf());
            }
        }
    }

    result
}

fn is_selected(relative: &Path, includes: &[Pattern], ignores: &[Pattern]) -> bool {
    includes.iter().any(|p| p.matches_path(relative))
        && !ignores.iter().any(|p| p.matches_path(relative))
}
