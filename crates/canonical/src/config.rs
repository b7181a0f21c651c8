//! Configuration types for the comparison-side normalizer.
//!
//! This module defines [`NormalizationConfig`], the set of independently
//! togglable options, and [`NormalizeStage`], the explicit descriptor of one
//! transform in the pipeline.
//!
//! # Stage order
//!
//! The reference pipeline always runs enabled stages in
//! [`DEFAULT_STAGE_ORDER`]:
//!
//! ```text
//! strip comments -> drop bracketed identifiers -> name mapping -> casefold -> collapse whitespace
//! ```
//!
//! Comment stripping is line oriented, so it has to see the original line
//! breaks; whitespace collapsing merges lines, so it always comes last. The
//! order is plain data: callers that need a different sequence can pass their
//! own slice to [`normalize_with_stages`](crate::normalize_with_stages).
//!
//! # Versioning
//!
//! The `version` field travels into the canonical hash. Any change to the
//! behavior of a stage must come with a version bump so hashes produced by
//! different behaviors never collide.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{NormalizationConfig, NormalizeStage};
//!
//! let config = NormalizationConfig {
//!     casefold: false,
//!     ..Default::default()
//! };
//! assert!(!config.stages().contains(&NormalizeStage::Casefold));
//! assert_eq!(config.stages().last(), Some(&NormalizeStage::CollapseWhitespace));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// One transform of the normalization pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeStage {
    /// Remove `--` line comments and `/* */` block comments.
    StripComments,
    /// Replace `[X]` and `` `X` `` with a bare `X`.
    DropBracketedIdentifiers,
    /// Apply the ordered [`NameMapping`](crate::NameMapping).
    ApplyNameMapping,
    /// Lowercase the whole text, string literals included.
    Casefold,
    /// Turn every whitespace run into one space and trim the ends.
    CollapseWhitespace,
}

/// Reference order of the normalization stages.
pub const DEFAULT_STAGE_ORDER: [NormalizeStage; 5] = [
    NormalizeStage::StripComments,
    NormalizeStage::DropBracketedIdentifiers,
    NormalizeStage::ApplyNameMapping,
    NormalizeStage::Casefold,
    NormalizeStage::CollapseWhitespace,
];

/// Options for the comparison-side normalizer.
///
/// Every option is independent; disabled options are simply skipped while
/// the remaining ones keep their relative order. The canonical form produced
/// with these options is only ever used for comparison. Nothing derived from
/// it is meant to be executed.
///
/// # Serialization
///
/// ```json
/// {
///   "version": 1,
///   "strip_comments": true,
///   "casefold": true,
///   "collapse_whitespace": true,
///   "drop_bracketed_identifiers": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Behavior version mixed into the canonical hash. Must be >= 1.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Remove SQL line and block comments.
    #[serde(default = "default_true")]
    pub strip_comments: bool,

    /// Lowercase the entire text.
    ///
    /// This also folds string literal contents, which is acceptable for a
    /// comparison form and never applied to translated output.
    #[serde(default = "default_true")]
    pub casefold: bool,

    /// Collapse every whitespace run (newlines included) into a single space.
    ///
    /// With this enabled the canonical form is a single line, so a line diff
    /// over it degenerates into a one-line comparison. Disable it to keep the
    /// line structure for side-by-side review.
    #[serde(default = "default_true")]
    pub collapse_whitespace: bool,

    /// Strip `[` `]` and `` ` `` delimiters around identifiers.
    #[serde(default = "default_true")]
    pub drop_bracketed_identifiers: bool,
}

impl NormalizationConfig {
    /// Enabled stages in reference order.
    ///
    /// Name mapping is always part of the list; with an empty mapping it is a
    /// no-op.
    pub fn stages(&self) -> Vec<NormalizeStage> {
        DEFAULT_STAGE_ORDER
            .iter()
            .copied()
            .filter(|stage| self.is_enabled(*stage))
            .collect()
    }

    /// Whether a given stage runs under this configuration.
    pub fn is_enabled(&self, stage: NormalizeStage) -> bool {
        match stage {
            NormalizeStage::StripComments => self.strip_comments,
            NormalizeStage::DropBracketedIdentifiers => self.drop_bracketed_identifiers,
            NormalizeStage::ApplyNameMapping => true,
            NormalizeStage::Casefold => self.casefold,
            NormalizeStage::CollapseWhitespace => self.collapse_whitespace,
        }
    }

    /// Reject configurations that cannot produce a versioned canonical form.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for NormalizationConfig {
    /// All options enabled, version 1. Matches the reference comparison
    /// settings.
    fn default() -> Self {
        Self {
            version: default_version(),
            strip_comments: true,
            casefold: true,
            collapse_whitespace: true,
            drop_bracketed_identifiers: true,
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}
