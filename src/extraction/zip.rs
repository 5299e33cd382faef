use crate::error::{ExtractError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::shared::{ensure_dir, unsafe_entry, write_entry};

/// Archive extractor for ZIP files
pub struct ZipExtractor;

impl ZipExtractor {
    /// Extract every entry of a ZIP archive under `dest_path`
    ///
    /// Entries are processed in the archive's own order. Directory entries are
    /// created idempotently; file entries are written byte-for-byte, replacing
    /// any existing file. The first failing entry aborts this archive and
    /// leaves already written files in place.
    pub fn extract(archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
        debug!(?archive_path, ?dest_path, "attempting ZIP extraction");

        ensure_dir(dest_path)?;

        let file = std::fs::File::open(archive_path)
            .map_err(|e| ExtractError::read(archive_path, format!("failed to open ZIP archive: {e}")))?;

        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| ExtractError::read(archive_path, format!("failed to read ZIP archive: {e}")))?;

        let mut extracted_files = Vec::new();

        for i in 0..archive.len() {
            let entry = archive.by_index(i).map_err(|e| {
                ExtractError::read(archive_path, format!("failed to read ZIP entry {i}: {e}"))
            })?;

            if let Some(file_path) = Self::extract_entry(entry, dest_path, archive_path)? {
                extracted_files.push(file_path);
            }
        }

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "ZIP extraction successful"
        );

        Ok(extracted_files)
    }

    /// Extract a single ZIP entry to disk, creating directories as needed
    fn extract_entry(
        mut entry: zip::read::ZipFile<'_>,
        dest_path: &Path,
        archive_path: &Path,
    ) -> Result<Option<PathBuf>> {
        // enclosed_name() is None for absolute paths and `..` escapes
        let file_path = match entry.enclosed_name() {
            Some(path) => dest_path.join(path),
            None => return Err(unsafe_entry(archive_path, entry.name()).into()),
        };

        if entry.is_dir() {
            ensure_dir(&file_path)?;
            return Ok(None);
        }

        let bytes = write_entry(&mut entry, &file_path, archive_path)?;
        debug!(?file_path, bytes, "wrote ZIP entry");

        Ok(Some(file_path))
    }
}
