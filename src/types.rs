//! Core types: archive kinds, per-archive outcomes and the batch report

use crate::error::FailureKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Archive type detected by file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveType {
    /// ZIP archive (.zip)
    Zip,
    /// 7-Zip archive (.7z)
    #[serde(rename = "7z")]
    SevenZip,
    /// RAR archive (.rar)
    Rar,
}

impl ArchiveType {
    /// Lowercase file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ArchiveType::Zip => "zip",
            ArchiveType::SevenZip => "7z",
            ArchiveType::Rar => "rar",
        }
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveType::Zip => f.write_str("ZIP"),
            ArchiveType::SevenZip => f.write_str("7z"),
            ArchiveType::Rar => f.write_str("RAR"),
        }
    }
}

/// Terminal state of one candidate file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArchiveStatus {
    /// Members were written under the destination
    ///
    /// With nested extraction enabled, a nested archive that fails to extract
    /// is only logged: the outer archive is still `Extracted` and the nested
    /// archive file stays in `files`.
    Extracted {
        /// Regular files written (including files from nested archives)
        files: Vec<PathBuf>,
    },
    /// Extraction did not complete; the path belongs in the failure list
    Failed {
        /// Failure classification
        kind: FailureKind,
        /// Human-readable cause
        reason: String,
    },
}

/// Outcome of attempting one candidate file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOutcome {
    /// The candidate file
    pub path: PathBuf,
    /// Detected archive type (`None` = unsupported extension)
    pub archive_type: Option<ArchiveType>,
    /// Extracted or failed
    #[serde(flatten)]
    pub status: ArchiveStatus,
}

impl ArchiveOutcome {
    /// Whether the archive was extracted
    pub fn is_extracted(&self) -> bool {
        matches!(self.status, ArchiveStatus::Extracted { .. })
    }

    /// Failure reason, if the archive failed
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            ArchiveStatus::Failed { reason, .. } => Some(reason),
            ArchiveStatus::Extracted { .. } => None,
        }
    }
}

/// Result of one run over a source path
///
/// Holds one outcome per candidate file, in processing order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchReport {
    /// Source file or directory
    pub source: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Outcomes in processing order
    pub outcomes: Vec<ArchiveOutcome>,
}

impl BatchReport {
    pub(crate) fn new(source: &Path, destination: &Path, outcomes: Vec<ArchiveOutcome>) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            outcomes,
        }
    }

    /// Paths that failed, in processing order
    pub fn failures(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_extracted())
            .map(|o| o.path.as_path())
    }

    /// Paths that were extracted, in processing order
    pub fn extracted(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter(|o| o.is_extracted())
            .map(|o| o.path.as_path())
    }

    /// Number of failed archives
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// True when no candidate failed
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

impl fmt::Display for BatchReport {
    /// Consolidated end-of-run summary
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(
                f,
                "Extraction completed. Files saved in {}",
                self.destination.display()
            );
        }

        write!(f, "The following files could not be extracted:")?;
        for path in self.failures() {
            write!(f, "\n{}", path.display())?;
        }
        Ok(())
    }
}
