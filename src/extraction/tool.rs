//! External archivers used by the command RAR backend

use crate::error::{ExtractError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::shared::ensure_dir;

/// A generic multi-format archiver that can unpack RAR
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveTool {
    /// RARLAB `unrar`
    Unrar,
    /// p7zip / 7-Zip `7z`
    SevenZip,
    /// The Unarchiver `unar`
    Unar,
    /// libarchive `bsdtar`
    Bsdtar,
}

impl ArchiveTool {
    /// Look up a tool by its binary name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "unrar" => Some(ArchiveTool::Unrar),
            "7z" => Some(ArchiveTool::SevenZip),
            "unar" => Some(ArchiveTool::Unar),
            "bsdtar" => Some(ArchiveTool::Bsdtar),
            _ => None,
        }
    }

    /// Binary searched for on PATH
    pub fn binary_name(self) -> &'static str {
        match self {
            ArchiveTool::Unrar => "unrar",
            ArchiveTool::SevenZip => "7z",
            ArchiveTool::Unar => "unar",
            ArchiveTool::Bsdtar => "bsdtar",
        }
    }

    /// Arguments for "extract everything from `archive` into `dest`, overwriting"
    pub fn extract_args(self, archive: &Path, dest: &Path) -> Vec<OsString> {
        match self {
            ArchiveTool::Unrar => {
                // unrar only treats the last argument as a directory with a trailing separator
                let mut dest_dir = dest.as_os_str().to_os_string();
                dest_dir.push(std::path::MAIN_SEPARATOR_STR);
                vec![
                    "x".into(),
                    "-o+".into(),
                    "-y".into(),
                    archive.into(),
                    dest_dir,
                ]
            }
            ArchiveTool::SevenZip => {
                let mut out = OsString::from("-o");
                out.push(dest);
                vec!["x".into(), "-y".into(), out, archive.into()]
            }
            ArchiveTool::Unar => vec![
                "-q".into(),
                "-f".into(),
                "-D".into(),
                "-o".into(),
                dest.into(),
                archive.into(),
            ],
            ArchiveTool::Bsdtar => vec![
                "-x".into(),
                "-f".into(),
                archive.into(),
                "-C".into(),
                dest.into(),
            ],
        }
    }
}

/// An external archiver resolved to a binary path
#[derive(Clone, Debug)]
pub struct CliArchiver {
    tool: ArchiveTool,
    binary_path: PathBuf,
}

impl CliArchiver {
    /// Create an archiver with an explicit binary path
    pub fn new(tool: ArchiveTool, binary_path: PathBuf) -> Self {
        Self { tool, binary_path }
    }

    /// Attempt to find `tool` in PATH
    pub fn from_path(tool: ArchiveTool) -> Option<Self> {
        which::which(tool.binary_name())
            .ok()
            .map(|path| Self::new(tool, path))
    }

    /// First tool of `names` (in order) that is installed
    ///
    /// Unknown names are logged and skipped.
    pub fn discover(names: &[String]) -> Option<Self> {
        names.iter().find_map(|name| match ArchiveTool::from_name(name) {
            Some(tool) => Self::from_path(tool),
            None => {
                warn!(tool = %name, "unknown archive tool, skipping");
                None
            }
        })
    }

    /// The tool this archiver runs
    pub fn tool(&self) -> ArchiveTool {
        self.tool
    }

    /// Extract `archive_path` into `dest_path`
    ///
    /// The tool unpacks into a staging directory created inside `dest_path`;
    /// the staged tree is then moved into place, which yields the exact list
    /// of files this archive produced. The staging directory is removed on
    /// every exit path.
    pub fn extract(&self, archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
        let staging = tempfile::Builder::new()
            .prefix(".batch-unpack-")
            .tempdir_in(dest_path)
            .map_err(|e| ExtractError::write(dest_path, e))?;

        debug!(
            tool = self.tool.binary_name(),
            binary = ?self.binary_path,
            ?archive_path,
            "running external archiver"
        );

        let output = Command::new(&self.binary_path)
            .args(self.tool.extract_args(archive_path, staging.path()))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.failed(archive_path, format!("failed to execute: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self
                .failed(
                    archive_path,
                    format!("{}: {}", output.status, stderr.trim()),
                )
                .into());
        }

        move_tree(staging.path(), dest_path)
    }

    fn failed(&self, archive_path: &Path, reason: String) -> ExtractError {
        ExtractError::ToolFailed {
            archive: archive_path.to_path_buf(),
            tool: self.tool.binary_name().to_string(),
            reason,
        }
    }
}

/// Move every entry below `staging` to the same relative path below `dest`
///
/// Directories are merged; files replace whatever is already there.
/// Returns the moved non-directory paths.
fn move_tree(staging: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let mut moved = Vec::new();

    for entry in WalkDir::new(staging).min_depth(1) {
        let entry = entry.map_err(|e| ExtractError::write(staging, std::io::Error::from(e)))?;
        let relative = entry
            .path()
            .strip_prefix(staging)
            .map_err(|e| ExtractError::write(entry.path(), std::io::Error::other(e)))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
            continue;
        }

        if target.is_dir() {
            std::fs::remove_dir_all(&target).map_err(|e| ExtractError::write(&target, e))?;
        } else if target.symlink_metadata().is_ok() {
            std::fs::remove_file(&target).map_err(|e| ExtractError::write(&target, e))?;
        }
        std::fs::rename(entry.path(), &target).map_err(|e| ExtractError::write(&target, e))?;
        moved.push(target);
    }

    Ok(moved)
}
