//! Configuration for the ingest step.
//!
//! ```rust
//! use ingest::IngestConfig;
//!
//! let config = IngestConfig::default();
//! config.validate().expect("default config is valid");
//! assert_eq!(config.max_bytes, Some(5 * 1024 * 1024));
//! ```
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Default raw size ceiling: 5 MiB.
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Default line ceiling. Line alignment is quadratic in the worst case, so
/// this bounds the cost of a comparison.
pub const DEFAULT_MAX_LINES: usize = 50_000;

/// Runtime configuration for ingest.
///
/// ```yaml
/// max_bytes: 5242880
/// max_lines: 50000
/// flatten_csv: true
/// ```
///
/// A `null` ceiling disables that check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestConfig {
    /// Maximum raw input size in bytes.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: Option<usize>,

    /// Maximum number of lines after decoding.
    #[serde(default = "default_max_lines")]
    pub max_lines: Option<usize>,

    /// Flatten `.csv` documents to one comma-joined line per data row.
    #[serde(default = "default_flatten_csv")]
    pub flatten_csv: bool,
}

fn default_max_bytes() -> Option<usize> {
    Some(DEFAULT_MAX_BYTES)
}

fn default_max_lines() -> Option<usize> {
    Some(DEFAULT_MAX_LINES)
}

fn default_flatten_csv() -> bool {
    true
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            max_lines: default_max_lines(),
            flatten_csv: default_flatten_csv(),
        }
    }
}

impl IngestConfig {
    /// No limits at all. Useful in tests and for trusted inputs.
    pub fn unbounded() -> Self {
        Self {
            max_bytes: None,
            max_lines: None,
            ..Self::default()
        }
    }

    /// Rejects zero ceilings; use `None` to disable a check.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_bytes == Some(0) {
            return Err(IngestError::InvalidConfig(
                "max_bytes must be greater than zero".into(),
            ));
        }
        if self.max_lines == Some(0) {
            return Err(IngestError::InvalidConfig(
                "max_lines must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
