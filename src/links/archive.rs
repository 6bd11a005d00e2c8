//! Javadoc archive extraction.

use crate::core::LinksError;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Unpacks the zip/jar at `archive` into `target`, creating it if needed.
///
/// Runs on the blocking pool since `zip` performs synchronous I/O. Entries
/// with paths escaping `target` are rejected by `zip` itself.
pub async fn extract_archive(archive: &Path, target: &Path) -> Result<(), LinksError> {
    let archive = archive.to_path_buf();
    let target = target.to_path_buf();

    let archive_for_error = archive.clone();
    tokio::task::spawn_blocking(move || extract_blocking(&archive, &target))
        .await
        .map_err(|e| LinksError::ArchiveExtraction {
            archive: archive_for_error,
            reason: format!("extraction task failed: {e}"),
        })?
}

fn extract_blocking(archive: &Path, target: &Path) -> Result<(), LinksError> {
    let failure = |reason: String| LinksError::ArchiveExtraction {
        archive: archive.to_path_buf(),
        reason,
    };

    let file = File::open(archive).map_err(|e| failure(e.to_string()))?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| failure(e.to_string()))?;
    std::fs::create_dir_all(target).map_err(|e| failure(e.to_string()))?;
    zip.extract(target).map_err(|e| failure(e.to_string()))?;

    debug!(
        target: "links",
        "Unpacked {} entries from {} into {}",
        zip.len(),
        archive.display(),
        target.display()
    );
    Ok(())
}
