//! # batch-unpack
//!
//! Batch extraction of ZIP, 7z and RAR archives.
//!
//! Given a source file or directory tree, batch-unpack finds every file,
//! picks an extractor from the file extension, writes the archive's members
//! under a destination directory and reports which files could not be
//! extracted. One failing archive never stops the rest of the batch.
//!
//! ## Quick Start
//!
//! ```no_run
//! use batch_unpack::{Config, extract_source};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = extract_source(
//!         Path::new("downloads"),
//!         Path::new("unpacked"),
//!         &Config::default(),
//!     )?;
//!
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Source traversal and per-file outcomes
pub mod batch;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Archive extraction
pub mod extraction;
/// Core types: archive kinds, outcomes, reports
pub mod types;

// Re-export commonly used types
pub use batch::{extract_one, extract_source, run_batch};
pub use config::{BatchConfig, Config, ExtractionConfig, RarBackend};
pub use error::{Error, ExtractError, FailureKind, Result};
pub use extraction::extract_archive;
pub use types::{ArchiveOutcome, ArchiveStatus, ArchiveType, BatchReport};
