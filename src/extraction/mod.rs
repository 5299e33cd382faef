//! Archive extraction
//!
//! This module dispatches a file to the ZIP, 7z or RAR extractor based on its
//! extension and writes the archive's members under a destination directory.
//! Every extractor returns the regular files it wrote.

mod rar;
mod sevenz;
mod shared;
mod tool;
mod zip;


// Re-exports
pub use rar::RarExtractor;
pub use sevenz::SevenZipExtractor;
pub use shared::{detect_archive_type, extract_recursive, is_archive};
pub use tool::{ArchiveTool, CliArchiver};
pub use zip::ZipExtractor;

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, Result};
use crate::types::ArchiveType;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Unified archive extraction dispatcher
///
/// Detects the archive type from the file extension and routes to the
/// matching extractor. A file with an unrecognized extension is rejected with
/// [`ExtractError::UnsupportedFormat`] without being opened.
///
/// # Example
/// ```no_run
/// use batch_unpack::config::ExtractionConfig;
/// use batch_unpack::extraction::extract_archive;
/// use std::path::Path;
///
/// # fn example() -> batch_unpack::error::Result<()> {
/// let files = extract_archive(
///     Path::new("photos.zip"),
///     Path::new("/tmp/extract"),
///     &ExtractionConfig::default(),
/// )?;
/// println!("Extracted {} files", files.len());
/// # Ok(())
/// # }
/// ```
pub fn extract_archive(
    archive_path: &Path,
    dest_path: &Path,
    config: &ExtractionConfig,
) -> Result<Vec<PathBuf>> {
    let Some(archive_type) = detect_archive_type(archive_path) else {
        warn!(?archive_path, "unsupported file format");
        return Err(ExtractError::UnsupportedFormat {
            archive: archive_path.to_path_buf(),
        }
        .into());
    };

    debug!(
        ?archive_path,
        ?archive_type,
        "dispatching extraction to appropriate extractor"
    );

    match archive_type {
        ArchiveType::Zip => ZipExtractor::extract(archive_path, dest_path),
        ArchiveType::SevenZip => SevenZipExtractor::extract(archive_path, dest_path),
        ArchiveType::Rar => RarExtractor::extract(archive_path, dest_path, config),
    }
}
