//! Configuration models for poex.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::order::Supplier;
use crate::error::{PoexError, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoexConfig {
    /// Extraction settings.
    pub extraction: ExtractionConfig,

    /// Document reading settings.
    pub pdf: PdfConfig,

    /// Payload output settings.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Supplier layout used when none is given on the command line.
    pub default_supplier: Supplier,
}

/// Document reading configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read (0 = unlimited).
    pub max_pages: usize,
}

/// Payload output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for timestamp-named payload artifacts.
    pub out_dir: Option<PathBuf>,

    /// Pretty-print the payload written to stdout.
    pub pretty: bool,
}

impl PoexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PoexError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
