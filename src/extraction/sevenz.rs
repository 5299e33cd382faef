use crate::error::{Error, ExtractError, Result};
use sevenz_rust::SevenZArchiveEntry;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::shared::{ensure_dir, resolve_entry_path, unsafe_entry, write_entry};

/// Archive extractor for 7z files
pub struct SevenZipExtractor;

impl SevenZipExtractor {
    /// Extract every entry of a 7z archive under `dest_path`
    ///
    /// Streams each entry through its own read handle instead of bulk
    /// extraction, so every stored path is checked before anything is written
    /// for it. Parent directories are created even when the archive carries no
    /// explicit directory entries. The first failing entry stops the archive
    /// and is the error returned.
    pub fn extract(archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
        debug!(?archive_path, ?dest_path, "attempting 7z extraction");

        ensure_dir(dest_path)?;

        let mut extracted_files = Vec::new();
        let mut entry_error: Option<Error> = None;

        let result = sevenz_rust::decompress_file_with_extract_fn(
            archive_path,
            dest_path,
            |entry, reader, _| match Self::extract_entry(entry, reader, dest_path, archive_path) {
                Ok(Some(file_path)) => {
                    extracted_files.push(file_path);
                    Ok(true)
                }
                Ok(None) => Ok(true),
                Err(e) => {
                    // Ok(false) only ends the current folder; an error ends the archive
                    let message = e.to_string();
                    entry_error.get_or_insert(e);
                    Err(sevenz_rust::Error::other(message))
                }
            },
        );

        if let Some(e) = entry_error {
            return Err(e);
        }

        result.map_err(|e| {
            ExtractError::read(archive_path, format!("failed to extract 7z archive: {e}"))
        })?;

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "7z extraction successful"
        );

        Ok(extracted_files)
    }

    fn extract_entry(
        entry: &SevenZArchiveEntry,
        reader: &mut dyn Read,
        dest_path: &Path,
        archive_path: &Path,
    ) -> Result<Option<PathBuf>> {
        let resolved = resolve_entry_path(dest_path, archive_path, entry.name())?;

        if entry.is_directory() {
            if let Some(dir_path) = resolved {
                ensure_dir(&dir_path)?;
            }
            return Ok(None);
        }

        let file_path = resolved.ok_or_else(|| unsafe_entry(archive_path, entry.name()))?;

        let bytes = write_entry(reader, &file_path, archive_path)?;
        debug!(?file_path, bytes, "wrote 7z entry");

        Ok(Some(file_path))
    }
}
