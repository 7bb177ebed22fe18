//! Post file discovery

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::BlogConfig;
use crate::error::Error;

/// Walk the posts root and collect Markdown files, relative to the root.
///
/// Siblings are visited in case-insensitive descending name order and each
/// directory's contents follow it immediately. Symlinks are not followed
/// and, being neither files nor directories, are skipped. Unreadable
/// directories are logged and contribute nothing.
pub fn discover_files(config: &BlogConfig, root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .sort_by(compare_names_desc)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                let err = Error::DirectoryRead { path, source: e };
                tracing::error!("{}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !config.is_markdown(&name) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(relative);
    }

    tracing::debug!("Discovered {} post files under {:?}", files.len(), root);
    files
}

/// Z→A by lowercase name, raw name descending on ties
fn compare_names_desc(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_name = a.file_name().to_string_lossy();
    let b_name = b.file_name().to_string_lossy();
    b_name
        .to_lowercase()
        .cmp(&a_name.to_lowercase())
        .then_with(|| b_name.cmp(&a_name))
}
