use crate::config::ExtractionConfig;
use crate::error::{ExtractError, Result};
use crate::types::ArchiveType;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Detect archive type by file extension
///
/// Matches the lowercased file name against `.zip`, `.7z` and `.rar`.
/// File contents are never inspected, so a renamed file is misclassified
/// here and only fails later, when its reader rejects it.
pub fn detect_archive_type(path: &Path) -> Option<ArchiveType> {
    let name = path.file_name()?.to_string_lossy().to_lowercase();

    [ArchiveType::Zip, ArchiveType::SevenZip, ArchiveType::Rar]
        .into_iter()
        .find(|archive_type| {
            name.strip_suffix(archive_type.extension())
                .is_some_and(|stem| stem.ends_with('.'))
        })
}

/// Check if a file is an archive based on its extension
///
/// Uses the configured list of archive extensions (without dots) to decide
/// whether an extracted file should be treated as a nested archive.
pub fn is_archive(path: &Path, archive_extensions: &[String]) -> bool {
    if let Some(ext) = path.extension() {
        let ext_str = ext.to_string_lossy().to_lowercase();
        archive_extensions
            .iter()
            .any(|ae| ae.to_lowercase() == ext_str)
    } else {
        false
    }
}

/// Create a directory and any missing parents; no error if it already exists
pub(crate) fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| ExtractError::write(path, e))?;
    Ok(())
}

/// Resolve an entry's stored path under `dest_path`
///
/// Rejects absolute paths and `..` segments so that no entry can be written
/// outside the destination. `.` segments are dropped. Returns `None` when the
/// name refers to the destination itself (e.g. the empty root entry some 7z
/// writers emit).
pub(crate) fn resolve_entry_path(
    dest_path: &Path,
    archive_path: &Path,
    entry: &str,
) -> Result<Option<PathBuf>> {
    let mut relative = PathBuf::new();
    for component in Path::new(entry).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(unsafe_entry(archive_path, entry).into());
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Ok(None);
    }

    Ok(Some(dest_path.join(relative)))
}

pub(crate) fn unsafe_entry(archive_path: &Path, entry: &str) -> ExtractError {
    ExtractError::UnsafeEntry {
        archive: archive_path.to_path_buf(),
        entry: entry.to_string(),
    }
}

/// Write one entry's byte stream to `target`, creating parent directories
///
/// Existing files are truncated and overwritten. Read errors are reported
/// against the archive, write errors against the target path.
pub(crate) fn write_entry(reader: &mut dyn Read, target: &Path, archive_path: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir(parent)?;
    }

    let mut outfile = BufWriter::new(File::create(target).map_err(|e| ExtractError::write(target, e))?);

    // io::copy would merge read and write errors; they map to different failure kinds
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractError::read(archive_path, e).into()),
        };
        outfile
            .write_all(&buf[..n])
            .map_err(|e| ExtractError::write(target, e))?;
        written += n as u64;
    }
    outfile.flush().map_err(|e| ExtractError::write(target, e))?;

    Ok(written)
}

/// Extract archives recursively to handle nested archives
///
/// Extracts an archive and then, up to `config.max_recursion_depth`, extracts
/// any archives found among the written files into
/// `<dest>/nested_<stem>_<depth>`. A nested failure is logged and does not
/// fail the outer archive.
pub fn extract_recursive(
    archive_path: &Path,
    dest_path: &Path,
    config: &ExtractionConfig,
    current_depth: u32,
) -> Result<Vec<PathBuf>> {
    debug!(
        ?archive_path,
        current_depth,
        max_depth = config.max_recursion_depth,
        "extracting archive (depth {}/{})",
        current_depth,
        config.max_recursion_depth
    );

    let extracted = crate::extraction::extract_archive(archive_path, dest_path, config)?;

    if current_depth >= config.max_recursion_depth {
        return Ok(extracted);
    }

    let mut all_files = extracted.clone();

    for file in &extracted {
        if !is_archive(file, &config.archive_extensions) {
            continue;
        }

        info!(?file, current_depth, "found nested archive, extracting recursively");

        let nested_dest = dest_path.join(format!(
            "nested_{}_{}",
            file.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("archive"),
            current_depth + 1
        ));

        match extract_recursive(file, &nested_dest, config, current_depth + 1) {
            Ok(nested_files) => {
                info!(
                    ?file,
                    nested_count = nested_files.len(),
                    "extracted {} files from nested archive",
                    nested_files.len()
                );
                all_files.extend(nested_files);
            }
            Err(e) => {
                warn!(
                    ?file,
                    error = %e,
                    "failed to extract nested archive, continuing with other files"
                );
            }
        }
    }

    Ok(all_files)
}
