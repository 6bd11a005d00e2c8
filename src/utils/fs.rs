//! File system helpers for regenerating build outputs.
//!
//! Outputs of link generation are fully regenerated on every run: the options
//! file is removed before any work starts and written in one atomic step at
//! the end, and the unpack directory is wiped and recreated. A failed run
//! therefore never leaves a file behind that looks like a complete result.

use crate::core::LinksError;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Returns an error if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(LinksError::FileSystemError {
            operation: "create directory (path exists but is not a directory)".to_string(),
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// Deletes `path` and everything below it, then recreates it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    ensure_dir(path)
}

/// Removes a file if it exists; a missing file is not an error.
pub fn remove_file_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove file: {}", path.display())),
    }
}

/// Writes `content` to `path` atomically.
///
/// The content goes to a temporary file in the same directory which is synced
/// and then renamed over `path`, so readers see either the old file, no file,
/// or the complete new content.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    ensure_dir(&parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(&parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;
    temp.persist(path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;
    Ok(())
}

/// Absolute form of `path` without resolving symlinks.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("Failed to make path absolute: {}", path.display()))
}
