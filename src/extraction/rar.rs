use crate::config::{ExtractionConfig, RarBackend};
use crate::error::{Error, ExtractError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::shared::{ensure_dir, resolve_entry_path, unsafe_entry};
use super::tool::CliArchiver;

/// Archive extractor for RAR files
///
/// RAR decoding is never done here: it is delegated either to the bundled
/// UnRAR library or to an external archiver found on PATH, depending on
/// [`ExtractionConfig::rar_backend`].
pub struct RarExtractor;

impl RarExtractor {
    /// Extract a RAR archive under `dest_path` using the configured backend
    pub fn extract(
        archive_path: &Path,
        dest_path: &Path,
        config: &ExtractionConfig,
    ) -> Result<Vec<PathBuf>> {
        debug!(
            ?archive_path,
            ?dest_path,
            backend = ?config.rar_backend,
            "attempting RAR extraction"
        );

        ensure_dir(dest_path)?;

        let extracted_files = match config.rar_backend {
            RarBackend::Library => Self::extract_with_library(archive_path, dest_path)?,
            RarBackend::Command => {
                let archiver = CliArchiver::discover(&config.rar_tools).ok_or_else(|| {
                    ExtractError::ToolUnavailable {
                        archive: archive_path.to_path_buf(),
                        tried: config.rar_tools.clone(),
                    }
                })?;
                archiver.extract(archive_path, dest_path)?
            }
        };

        info!(
            ?archive_path,
            extracted_count = extracted_files.len(),
            "RAR extraction successful"
        );

        Ok(extracted_files)
    }

    /// Convert an unrar error into a read failure for this archive
    fn convert_unrar_error(e: unrar::error::UnrarError, archive_path: &Path) -> Error {
        ExtractError::read(archive_path, e).into()
    }

    /// Walk the archive header by header with the UnRAR library
    fn extract_with_library(archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
        let mut at_header = unrar::Archive::new(archive_path)
            .open_for_processing()
            .map_err(|e| Self::convert_unrar_error(e, archive_path))?;

        let mut extracted_files = Vec::new();

        loop {
            let at_file = match at_header.read_header() {
                Ok(Some(entry_processor)) => entry_processor,
                Ok(None) => break,
                Err(e) => return Err(Self::convert_unrar_error(e, archive_path)),
            };

            let header = at_file.entry();
            let is_directory = header.is_directory();
            let entry_name = header.filename.to_string_lossy().into_owned();
            let resolved = resolve_entry_path(dest_path, archive_path, &entry_name)?;

            if is_directory {
                if let Some(dir_path) = resolved {
                    ensure_dir(&dir_path)?;
                }
                at_header = at_file
                    .skip()
                    .map_err(|e| Self::convert_unrar_error(e, archive_path))?;
            } else {
                let file_path =
                    resolved.ok_or_else(|| unsafe_entry(archive_path, &entry_name))?;
                if let Some(parent) = file_path.parent() {
                    ensure_dir(parent)?;
                }
                if file_path.is_file() {
                    std::fs::remove_file(&file_path)
                        .map_err(|e| ExtractError::write(&file_path, e))?;
                }
                at_header = at_file
                    .extract_to(&file_path)
                    .map_err(|e| Self::convert_unrar_error(e, archive_path))?;
                debug!(?file_path, "wrote RAR entry");
                extracted_files.push(file_path);
            }
        }

        Ok(extracted_files)
    }
}
