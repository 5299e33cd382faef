//! Configuration types for batch-unpack

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration
///
/// Every field has a default, so an empty JSON object (or no config file at
/// all) yields a working setup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Archive extraction behavior
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Source traversal behavior
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The loaded configuration is
    /// validated before it is returned.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
            key: None,
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.extraction.rar_backend == RarBackend::Command && self.extraction.rar_tools.is_empty()
        {
            return Err(Error::Config {
                message: "the command RAR backend needs at least one tool".to_string(),
                key: Some("extraction.rar_tools".to_string()),
            });
        }

        if let Some(ext) = self
            .extraction
            .archive_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(Error::Config {
                message: format!("archive extension {ext:?} must be non-empty and without a dot"),
                key: Some("extraction.archive_extensions".to_string()),
            });
        }

        Ok(())
    }
}

/// Archive extraction configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum depth for nested archive extraction (default: 0, nested archives are left as files)
    #[serde(default)]
    pub max_recursion_depth: u32,

    /// File extensions to treat as nested archives (without dots)
    #[serde(default = "default_archive_extensions")]
    pub archive_extensions: Vec<String>,

    /// How RAR archives are extracted (default: library)
    #[serde(default)]
    pub rar_backend: RarBackend,

    /// External archivers tried in order by the command RAR backend
    #[serde(default = "default_rar_tools")]
    pub rar_tools: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 0,
            archive_extensions: default_archive_extensions(),
            rar_backend: RarBackend::default(),
            rar_tools: default_rar_tools(),
        }
    }
}

/// RAR extraction strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarBackend {
    /// Bundled UnRAR library (default)
    #[default]
    Library,
    /// First generic archiver found on PATH
    Command,
}

/// Source traversal configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Follow symbolic links while walking a source directory (default: false)
    #[serde(default)]
    pub follow_links: bool,

    /// Skip the destination subtree when it lies inside the source (default: true)
    #[serde(default = "default_true")]
    pub skip_destination: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            skip_destination: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_archive_extensions() -> Vec<String> {
    vec!["zip".into(), "7z".into(), "rar".into()]
}

fn default_rar_tools() -> Vec<String> {
    vec!["unrar".into(), "7z".into(), "unar".into(), "bsdtar".into()]
}
