//! YAML configuration file support.
//!
//! One file holds every stage configuration, the ordered name mapping and the
//! pass threshold, so a comparison run can be reproduced from the file alone.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "tsql-to-snowflake"
//!
//! ingest:
//!   max_bytes: 5242880
//!   max_lines: 50000
//!   flatten_csv: true
//!
//! normalize:
//!   version: 1
//!   strip_comments: true
//!   casefold: true
//!   collapse_whitespace: true
//!   drop_bracketed_identifiers: true
//!
//! # Applied top to bottom, each over the output of the previous entry.
//! mapping:
//!   - { source: "dbo.", target: "PUBLIC." }
//!   - { source: "[dbo].", target: "PUBLIC." }
//!
//! threshold: 95.0
//!
//! explain:
//!   min_token_chars: 4
//!   max_listed: 10
//! ```

use std::fs;
use std::path::Path;

use canonical::{NameMapping, NormalizationConfig};
use explain::ExplainConfig;
use ingest::IngestConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Default pass threshold, in percent.
pub const DEFAULT_THRESHOLD: f64 = 95.0;

/// Top-level configuration for a comparison run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CongruenceConfig {
    /// Configuration format version
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub normalize: NormalizationConfig,

    /// Ordered name mapping shared by the normalizer and the translator.
    #[serde(default = "default_mapping")]
    pub mapping: NameMapping,

    /// Congruence percentage in `[0, 100]` at or above which a run passes.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    #[serde(default)]
    pub explain: ExplainConfig,
}

impl CongruenceConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: CongruenceConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(ConfigLoadError::Validation(format!(
                "threshold must be within [0, 100], got {}",
                self.threshold
            )));
        }
        if let Some(pos) = self
            .mapping
            .entries()
            .iter()
            .position(|e| e.source.is_empty())
        {
            return Err(ConfigLoadError::Validation(format!(
                "mapping entry {} has an empty source",
                pos + 1
            )));
        }

        self.ingest
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("ingest: {e}")))?;
        self.normalize
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("normalize: {e}")))?;
        self.explain
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("explain: {e}")))?;

        Ok(())
    }
}

impl Default for CongruenceConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            name: None,
            ingest: IngestConfig::default(),
            normalize: NormalizationConfig::default(),
            mapping: default_mapping(),
            threshold: default_threshold(),
            explain: ExplainConfig::default(),
        }
    }
}

fn default_format_version() -> String {
    "1.0".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// `dbo.` and `[dbo].` both retarget to Snowflake's `PUBLIC.` schema.
pub fn default_mapping() -> NameMapping {
    NameMapping::from_pairs([("dbo.", "PUBLIC."), ("[dbo].", "PUBLIC.")])
}
