//! Dashboard configuration file support.
//!
//! This module reads engine settings (time zone, default metric, extra field
//! names) from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::domain::Metric;
use crate::core::error::{DatasetError, DatasetResult, ErrorContext};
use crate::preprocessing::{FieldVocabulary, RecordNormalizer, SemanticField};
use crate::time::ZoneMode;

pub const CONFIG_FILE_NAME: &str = "pack-efficiency.toml";

/// Dashboard configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub time: TimeSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub fields: FieldSettings,
}

/// Hour-bucketing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSettings {
    #[serde(default = "default_zone")]
    pub zone: String,
}

/// Report display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_metric")]
    pub metric: String,
}

/// Extra candidate keys, tried after the built-in vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSettings {
    #[serde(default)]
    pub worker: Vec<String>,
    #[serde(default)]
    pub completion_time: Vec<String>,
    #[serde(default)]
    pub quantity: Vec<String>,
}

fn default_zone() -> String {
    "local".to_string()
}

fn default_metric() -> String {
    "packages".to_string()
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            zone: default_zone(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            metric: default_metric(),
        }
    }
}

impl FromStr for DashboardConfig {
    type Err = DatasetError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content).map_err(|e| DatasetError::Configuration {
            message: format!("Failed to parse config file: {}", e),
            context: ErrorContext::new("parse_config"),
        })
    }
}

impl DashboardConfig {
    /// Load dashboard configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if successful
    /// * `Err(DatasetError::Configuration)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let source = path.as_ref().display().to_string();
        let content = fs::read_to_string(path.as_ref()).map_err(|e| DatasetError::Configuration {
            message: format!("Failed to read config file: {}", e),
            context: ErrorContext::new("read_config").with_source(source.clone()),
        })?;

        content
            .parse::<DashboardConfig>()
            .map_err(|e| e.with_source(source))
    }

    /// Load dashboard configuration from the default location.
    ///
    /// Searches for `pack-efficiency.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> DatasetResult<Self> {
        let search_paths = vec![
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(DatasetError::configuration(format!(
            "No {} found in standard locations",
            CONFIG_FILE_NAME
        )))
    }

    pub fn zone_mode(&self) -> DatasetResult<ZoneMode> {
        self.time
            .zone
            .parse()
            .map_err(|e: String| DatasetError::configuration(e).with_operation("time.zone"))
    }

    pub fn metric(&self) -> DatasetResult<Metric> {
        self.report
            .metric
            .parse()
            .map_err(|e: String| DatasetError::configuration(e).with_operation("report.metric"))
    }

    /// Built-in vocabularies extended with the configured keys.
    pub fn vocabulary(&self) -> FieldVocabulary {
        let mut vocabulary = FieldVocabulary::standard();
        vocabulary.extend(SemanticField::WorkerName, self.fields.worker.iter().cloned());
        vocabulary.extend(
            SemanticField::CompletionTime,
            self.fields.completion_time.iter().cloned(),
        );
        vocabulary.extend(SemanticField::ItemQuantity, self.fields.quantity.iter().cloned());
        vocabulary
    }

    pub fn normalizer(&self) -> DatasetResult<RecordNormalizer> {
        Ok(RecordNormalizer::new(self.vocabulary(), self.zone_mode()?))
    }
}
