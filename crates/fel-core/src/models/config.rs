//! Configuration structures for extraction and report output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::FelError;
use crate::invoice::ItemPolicy;
use crate::models::record::MISSING_VALUE;
use crate::xml::FEL_NAMESPACE;

/// Main configuration for the fel pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FelConfig {
    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report output configuration.
    pub report: ReportConfig,

    /// Batch handling configuration.
    pub batch: BatchConfig,
}

/// Invoice extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Namespace URI invoice elements are matched against.
    pub namespace: String,

    /// Placeholder for absent attributes.
    pub missing_value: String,

    /// What to do with an item missing one of its value children.
    pub item_policy: ItemPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            namespace: FEL_NAMESPACE.to_string(),
            missing_value: MISSING_VALUE.to_string(),
            item_policy: ItemPolicy::FailDocument,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: ReportFormat,

    /// Worksheet name for xlsx output.
    pub sheet_name: String,

    /// Output path used when none is given on the command line.
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Xlsx,
            sheet_name: "Facturas".to_string(),
            output: PathBuf::from("facturas.xlsx"),
        }
    }
}

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Excel workbook.
    #[default]
    Xlsx,
    /// Comma-separated values.
    Csv,
}

impl ReportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Batch handling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Keep going when a document fails instead of aborting the batch.
    pub continue_on_error: bool,
}

impl FelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, FelError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FelError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), FelError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FelError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = FelConfig::default();
        assert_eq!(config.extraction.namespace, FEL_NAMESPACE);
        assert_eq!(config.extraction.missing_value, "No disponible");
        assert_eq!(config.extraction.item_policy, ItemPolicy::FailDocument);
        assert_eq!(config.report.format, ReportFormat::Xlsx);
        assert_eq!(config.report.output, PathBuf::from("facturas.xlsx"));
        assert!(!config.batch.continue_on_error);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: FelConfig = serde_json::from_str(
            r#"{ "extraction": { "item_policy": "skip_item" }, "report": { "format": "csv" } }"#,
        )
        .unwrap();

        assert_eq!(config.extraction.item_policy, ItemPolicy::SkipItem);
        assert_eq!(config.extraction.missing_value, "No disponible");
        assert_eq!(config.report.format, ReportFormat::Csv);
        assert_eq!(config.report.sheet_name, "Facturas");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FelConfig::default();
        config.batch.continue_on_error = true;
        config.report.sheet_name = "Compras".to_string();
        config.save(&path).unwrap();

        assert_eq!(FelConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(FelConfig::from_file(&path), Err(FelError::Config(_))));
    }
}
