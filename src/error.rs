//! Error types for batch-unpack
//!
//! This module provides the error handling for the library:
//! - A crate-wide [`Error`] for run-level problems (bad source, bad config)
//! - A per-archive [`ExtractError`] that never aborts a batch
//! - [`FailureKind`], the machine-readable classification reported for failed archives

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for batch-unpack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for batch-unpack
///
/// Each variant includes contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "extraction.rar_tools")
        key: Option<String>,
    },

    /// Source path is neither an existing file nor an existing directory
    #[error("{} is not a valid path", path.display())]
    InvalidSource {
        /// The path that was given as the source
        path: PathBuf,
    },

    /// Extraction of a single archive failed
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Per-archive extraction errors
///
/// These are caught by the batch driver and turned into failed outcomes.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// File extension is not one of the supported archive formats
    #[error("unsupported file format: {}", archive.display())]
    UnsupportedFormat {
        /// The file that was not recognized as an archive
        archive: PathBuf,
    },

    /// Archive is corrupt, truncated, encrypted or otherwise unreadable
    #[error("failed to read archive {}: {reason}", archive.display())]
    ArchiveRead {
        /// The archive that could not be read
        archive: PathBuf,
        /// The reason reported by the archive reader
        reason: String,
    },

    /// Writing into the destination failed
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The destination path that could not be written
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// An entry's stored path would resolve outside the destination
    #[error("unsafe entry path {entry:?} in {}", archive.display())]
    UnsafeEntry {
        /// The archive carrying the entry
        archive: PathBuf,
        /// The entry name as stored in the archive
        entry: String,
    },

    /// No external archiver could be found on PATH
    #[error("no archive tool available for {} (tried: {})", archive.display(), tried.join(", "))]
    ToolUnavailable {
        /// The archive that needed the tool
        archive: PathBuf,
        /// Tool names that were searched for
        tried: Vec<String>,
    },

    /// An external archiver ran but reported failure
    #[error("{tool} failed to extract {}: {reason}", archive.display())]
    ToolFailed {
        /// The archive that failed
        archive: PathBuf,
        /// Name of the tool that was run
        tool: String,
        /// Exit status and stderr of the tool
        reason: String,
    },
}

impl ExtractError {
    /// Build an [`ExtractError::Write`] for `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Write {
            path: path.into(),
            source,
        }
    }

    /// Build an [`ExtractError::ArchiveRead`] from any displayable reader error
    pub fn read(archive: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ExtractError::ArchiveRead {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }

    /// Classify this error for reporting
    pub fn kind(&self) -> FailureKind {
        match self {
            ExtractError::UnsupportedFormat { .. } => FailureKind::UnsupportedFormat,
            ExtractError::Write { .. } => FailureKind::Write,
            ExtractError::ArchiveRead { .. }
            | ExtractError::UnsafeEntry { .. }
            | ExtractError::ToolUnavailable { .. }
            | ExtractError::ToolFailed { .. } => FailureKind::ArchiveRead,
        }
    }
}

/// Why an archive ended up in the failure list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Extension not in {zip, 7z, rar}
    UnsupportedFormat,
    /// The format-specific reader could not process the archive
    ArchiveRead,
    /// The destination could not be written
    Write,
}

impl Error {
    /// Classify an error raised while processing one archive
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::Extract(e) => e.kind(),
            Error::Io(_) => FailureKind::Write,
            Error::Config { .. }
            | Error::InvalidSource { .. }
            | Error::Serialization(_) => FailureKind::ArchiveRead,
        }
    }

    /// Get the machine-readable error code
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::InvalidSource { .. } => "invalid_source",
            Error::Extract(e) => match e {
                ExtractError::UnsupportedFormat { .. } => "unsupported_format",
                ExtractError::ArchiveRead { .. } => "archive_read_failed",
                ExtractError::Write { .. } => "write_failed",
                ExtractError::UnsafeEntry { .. } => "unsafe_entry",
                ExtractError::ToolUnavailable { .. } => "tool_unavailable",
                ExtractError::ToolFailed { .. } => "tool_failed",
            },
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
        }
    }
}
