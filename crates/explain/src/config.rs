use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length, in characters, of a word reported as vocabulary.
///
/// Shorter words are mostly keywords, aliases and operators (`AS`, `ON`,
/// `AND`, `t1`) that differ between dialects without telling the reader
/// anything.
pub const VOCABULARY_MIN_TOKEN_CHARS: usize = 4;

/// Maximum number of words listed per vocabulary message, so a message stays
/// readable on one line.
pub const VOCABULARY_MAX_LISTED: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExplainError {
    #[error("invalid explain configuration: {0}")]
    InvalidConfig(String),
}

/// Tuning for the vocabulary pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplainConfig {
    #[serde(default = "default_min_token_chars")]
    pub min_token_chars: usize,
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
}

fn default_min_token_chars() -> usize {
    VOCABULARY_MIN_TOKEN_CHARS
}

fn default_max_listed() -> usize {
    VOCABULARY_MAX_LISTED
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            min_token_chars: VOCABULARY_MIN_TOKEN_CHARS,
            max_listed: VOCABULARY_MAX_LISTED,
        }
    }
}

impl ExplainConfig {
    pub fn validate(&self) -> Result<(), ExplainError> {
        if self.max_listed == 0 {
            return Err(ExplainError::InvalidConfig(
                "max_listed must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let cfg = ExplainConfig::default();
        assert_eq!(cfg.min_token_chars, 4);
        assert_eq!(cfg.max_listed, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_max_listed_is_rejected() {
        let cfg = ExplainConfig {
            max_listed: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ExplainError::InvalidConfig(_))));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: ExplainConfig = serde_json::from_str(r#"{"max_listed": 3}"#).unwrap();
        assert_eq!(cfg.min_token_chars, VOCABULARY_MIN_TOKEN_CHARS);
        assert_eq!(cfg.max_listed, 3);
    }
}
