//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Longest accepted period between watch cycles (one year).
pub const MAX_INTERVAL_HOURS: u64 = 24 * 366;

/// Main configuration for the facturas pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacturasConfig {
    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Batch and periodic run configuration.
    pub batch: BatchConfig,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Name fragments that identify the invoice recipient rather than the issuer.
    ///
    /// A CUIT candidate whose name contains one of these is heavily penalized.
    pub counterparty_tokens: Vec<String>,

    /// Characters of context captured on each side of a CUIT label.
    pub context_window: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            counterparty_tokens: vec!["PATAGONIA".to_string(), "BEVERAGE".to_string()],
            context_window: 250,
        }
    }
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Directory scanned for pending documents.
    pub input_dir: PathBuf,

    /// Report output file (`.csv` or `.json`).
    pub output: PathBuf,

    /// JSON file holding ids of documents already processed.
    pub tracking_file: PathBuf,

    /// File extensions picked up from the input directory.
    pub extensions: Vec<String>,

    /// Number of documents processed in parallel.
    pub jobs: usize,

    /// Hours between periodic runs.
    pub interval_hours: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("invoices"),
            output: PathBuf::from("output/facturas.csv"),
            tracking_file: PathBuf::from("output/.processed_ids.json"),
            extensions: vec!["pdf".to_string(), "txt".to_string()],
            jobs: 4,
            interval_hours: 6,
        }
    }
}

impl FacturasConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check values that would make a run meaningless.
    pub fn validate(&self) -> crate::Result<()> {
        if self.batch.jobs == 0 {
            return Err(crate::FacturasError::Config("batch.jobs must be at least 1".to_string()));
        }
        if !(1..=MAX_INTERVAL_HOURS).contains(&self.batch.interval_hours) {
            return Err(crate::FacturasError::Config(format!(
                "batch.interval_hours must be between 1 and {MAX_INTERVAL_HOURS}"
            )));
        }
        if self.extraction.context_window == 0 {
            return Err(crate::FacturasError::Config(
                "extraction.context_window must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
