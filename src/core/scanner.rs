//! Directory scanner module.
//!
//! Finds candidate episode files below a download directory.

use crate::utils::fs::{ensure_directory, has_extension};
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Video container extensions picked up by `plexbot move`.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// Recursively find regular files with one of `extensions` below `root`.
///
/// Extensions are compared case-insensitively and given without the dot.
/// Results are sorted by path so runs are reproducible.
pub fn find_files(extensions: &[&str], root: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort();

    tracing::debug!("Found {} matching file(s) in {}", files.len(), root.display());

    Ok(files)
}

/// Find video files below `root`.
pub fn find_video_files(root: &Path) -> Result<Vec<PathBuf>> {
    find_files(VIDEO_EXTENSIONS, root)
}

// Integration tests for find_files() live in tests/scanner_tests.rs
