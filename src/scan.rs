//! Markdown file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::limits::normalize_path;
use crate::tokens::is_markdown_file;

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", "coverage"];

fn is_excluded(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}

/// Recursively find markdown files under `dir`, sorted by path.
pub fn find_markdown_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_markdown_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Expand command-line paths into the files to process.
///
/// No paths means "scan `root`". Relative paths are taken from `root`.
/// Missing paths are logged and skipped.
pub fn collect_targets(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        return find_markdown_files(root);
    }

    let mut files = Vec::new();
    for path in paths {
        let full = root.join(path);
        if !full.exists() {
            log::warn!("path not found: {}", path.display());
            continue;
        }
        if full.is_dir() {
            files.extend(find_markdown_files(&full));
        } else {
            files.push(full);
        }
    }
    files
}

/// Path of `file` relative to `root`, with `/` separators.
///
/// Files outside `root` keep their full path.
pub fn display_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let lossy = relative.to_string_lossy();
    let text = lossy.strip_prefix("./").unwrap_or(lossy.as_ref());
    normalize_path(text).into_owned()
}
