use thiserror::Error;

/// Errors that can occur while configuring normalization.
///
/// Normalizing text itself never fails; these variants only surface from
/// configuration validation and mapping parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid name mapping on line {line}: {reason}")]
    InvalidMapping { line: usize, reason: String },
}
