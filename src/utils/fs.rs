//! File system utilities.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Copy a file, carrying over the source permissions.
///
/// Data goes to a sibling `.partial` file first and is renamed into place,
/// so `to` only ever appears complete. An existing `to` is replaced.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let partial = partial_path(to);
    let copy_failed = |source: std::io::Error| crate::Error::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    };

    if let Err(e) = fs::copy(from, &partial) {
        let _ = fs::remove_file(&partial);
        return Err(copy_failed(e));
    }

    if let Err(e) = fs::rename(&partial, to) {
        let _ = fs::remove_file(&partial);
        return Err(copy_failed(e));
    }

    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

/// Original file extension including the leading dot, or an empty string.
pub fn extension_with_dot(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Check if a file has one of the given extensions (case insensitive, no dot).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let exts = ["mkv", "mp4", "avi"];
        assert!(has_extension(Path::new("show.mkv"), &exts));
        assert!(has_extension(Path::new("show.MP4"), &exts));
        assert!(!has_extension(Path::new("show.srt"), &exts));
        assert!(!has_extension(Path::new("mkv"), &exts));
    }

    #[test]
    fn test_extension_with_dot() {
        assert_eq!(extension_with_dot(Path::new("/a/b.MKV")), ".MKV");
        assert_eq!(extension_with_dot(Path::new("/a/b")), "");
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tv/Show/s1e01.mkv")),
            PathBuf::from("/tv/Show/s1e01.mkv.partial")
        );
    }
}
