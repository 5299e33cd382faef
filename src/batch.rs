//! Batch traversal
//!
//! Discovers candidate files from a source (a single file or a directory
//! tree) and drives each one through [`extract_recursive`], one at a time.
//! Every per-archive failure is turned into a failed [`ArchiveOutcome`]; only
//! an invalid source stops a run, and it does so before any extraction.

use crate::config::{BatchConfig, Config, ExtractionConfig};
use crate::error::{Error, Result};
use crate::extraction::{detect_archive_type, extract_recursive};
use crate::types::{ArchiveOutcome, ArchiveStatus, BatchReport};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extract every candidate under `source` into `destination`
///
/// `on_outcome` is called once per candidate, in processing order, as soon as
/// its outcome is known. The returned report holds the same outcomes.
///
/// # Errors
///
/// Returns [`Error::InvalidSource`] if `source` is neither an existing file
/// nor an existing directory. No archive is attempted in that case.
///
/// # Example
///
/// ```no_run
/// use batch_unpack::{Config, run_batch};
/// use std::path::Path;
///
/// # fn example() -> batch_unpack::Result<()> {
/// let report = run_batch(
///     Path::new("downloads"),
///     Path::new("unpacked"),
///     &Config::default(),
///     |outcome| println!("{}: {}", outcome.path.display(), outcome.is_extracted()),
/// )?;
/// for failed in report.failures() {
///     eprintln!("failed: {}", failed.display());
/// }
/// # Ok(())
/// # }
/// ```
pub fn run_batch<F>(
    source: &Path,
    destination: &Path,
    config: &Config,
    mut on_outcome: F,
) -> Result<BatchReport>
where
    F: FnMut(&ArchiveOutcome),
{
    let candidates = discover_candidates(source, destination, &config.batch)?;

    info!(
        ?source,
        ?destination,
        candidate_count = candidates.len(),
        "found {} candidate file(s)",
        candidates.len()
    );

    let mut outcomes = Vec::with_capacity(candidates.len());
    for (i, path) in candidates.iter().enumerate() {
        debug!(
            ?path,
            progress = i + 1,
            total = candidates.len(),
            "processing candidate {}/{}",
            i + 1,
            candidates.len()
        );

        let outcome = extract_one(path, destination, &config.extraction);
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    let report = BatchReport::new(source, destination, outcomes);

    info!(
        extracted = report.extracted().count(),
        failed = report.failure_count(),
        "batch complete"
    );

    Ok(report)
}

/// [`run_batch`] without a progress callback
pub fn extract_source(source: &Path, destination: &Path, config: &Config) -> Result<BatchReport> {
    run_batch(source, destination, config, |_| {})
}

/// Attempt one candidate file and capture its terminal state
///
/// Never fails: any error becomes [`ArchiveStatus::Failed`].
pub fn extract_one(path: &Path, destination: &Path, config: &ExtractionConfig) -> ArchiveOutcome {
    let archive_type = detect_archive_type(path);

    let status = match extract_recursive(path, destination, config, 0) {
        Ok(files) => ArchiveStatus::Extracted { files },
        Err(e) => {
            warn!(
                ?path,
                error = %e,
                code = e.error_code(),
                "failed to extract, continuing with others"
            );
            ArchiveStatus::Failed {
                kind: e.failure_kind(),
                reason: e.to_string(),
            }
        }
    };

    ArchiveOutcome {
        path: path.to_path_buf(),
        archive_type,
        status,
    }
}

/// List candidate files, in traversal order
///
/// A file source is its own single candidate, whatever its extension. A
/// directory source yields every file below it (sorted by name within each
/// directory). Entries that cannot be read are logged and skipped.
pub fn discover_candidates(
    source: &Path,
    destination: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>> {
    if source.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    if !source.is_dir() {
        warn!(?source, "source is not a valid path");
        return Err(Error::InvalidSource {
            path: source.to_path_buf(),
        });
    }

    // Only an existing destination can be inside the tree being walked
    let skipped_root = if config.skip_destination {
        destination.canonicalize().ok()
    } else {
        None
    };

    let walker = WalkDir::new(source)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let Some(root) = skipped_root.as_ref() else {
                return true;
            };
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry.path().canonicalize().map_or(true, |path| &path != root)
        });

    let mut candidates = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => {
                let is_file = entry.file_type().is_file()
                    || (entry.path_is_symlink() && entry.path().is_file());
                if is_file {
                    candidates.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
            }
        }
    }

    Ok(candidates)
}
