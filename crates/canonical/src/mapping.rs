//! Ordered source-to-target name mapping.
//!
//! A [`NameMapping`] retargets schema prefixes and identifiers, for example
//! `dbo.` to `PUBLIC.`. Entries apply one after another, each as a
//! case-insensitive literal substitution over the text produced by the
//! previous entry. An earlier entry's output can therefore be matched again by
//! a later entry:
//!
//! ```rust
//! use canonical::NameMapping;
//!
//! let mapping = NameMapping::from_pairs([("dbo.", "stage."), ("stage.", "PUBLIC.")]);
//! assert_eq!(mapping.apply("select * from DBO.orders"), "select * from PUBLIC.orders");
//! ```
//!
//! Entry order is part of the contract and is never rearranged.

use std::str::FromStr;

use regex::{NoExpand, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CanonicalError;

/// One `source -> target` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingEntry {
    pub source: String,
    pub target: String,
}

/// Ordered list of literal, case-insensitive rewrites.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct NameMapping {
    entries: Vec<MappingEntry>,
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mapping from pairs, keeping their order.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut mapping = Self::new();
        for (source, target) in pairs {
            mapping.push(source, target);
        }
        mapping
    }

    /// Appends an entry. A source that is already present keeps its position
    /// and takes the new target.
    pub fn push(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        let target = target.into();
        match self.entries.iter_mut().find(|e| e.source == source) {
            Some(existing) => existing.target = target,
            None => self.entries.push(MappingEntry { source, target }),
        }
    }

    /// Parses the `SRC -> TGT` one-pair-per-line format.
    ///
    /// Lines without `->` are ignored. Both sides are trimmed. A line whose
    /// source is empty is rejected, since an empty pattern would match
    /// between every character.
    ///
    /// ```rust
    /// use canonical::NameMapping;
    ///
    /// let mapping = NameMapping::parse("dbo. -> PUBLIC.\n# note\n[dbo]. -> PUBLIC.").unwrap();
    /// assert_eq!(mapping.len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, CanonicalError> {
        let mut mapping = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let Some((source, target)) = line.split_once("->") else {
                continue;
            };
            let source = source.trim();
            if source.is_empty() {
                return Err(CanonicalError::InvalidMapping {
                    line: idx + 1,
                    reason: "source must not be empty".into(),
                });
            }
            mapping.push(source, target.trim());
        }
        Ok(mapping)
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies every entry in order to the progressively rewritten text.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for entry in &self.entries {
            if entry.source.is_empty() {
                warn!(mapping_target = %entry.target, "mapping_empty_source_skipped");
                continue;
            }
            let pattern = regex::escape(&entry.source);
            let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => re,
                Err(err) => {
                    warn!(source = %entry.source, error = %err, "mapping_pattern_rejected");
                    continue;
                }
            };
            let rewritten = re
                .replace_all(&out, NoExpand(entry.target.as_str()))
                .into_owned();
            out = rewritten;
        }
        out
    }
}

impl FromStr for NameMapping {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Free-function form of [`NameMapping::apply`].
pub fn apply_mapping(text: &str, mapping: &NameMapping) -> String {
    mapping.apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_case_insensitively_with_literal_target() {
        let mapping = NameMapping::from_pairs([("dbo.", "PUBLIC.")]);
        assert_eq!(
            mapping.apply("SELECT * FROM DBO.Orders JOIN dbo.Lines"),
            "SELECT * FROM PUBLIC.Orders JOIN PUBLIC.Lines"
        );
    }

    #[test]
    fn metacharacters_in_source_match_literally() {
        let mapping = NameMapping::from_pairs([("a.b(", "x(")]);
        assert_eq!(mapping.apply("a.b(1) axb(2)"), "x(1) axb(2)");
    }

    #[test]
    fn dollar_in_target_is_not_expanded() {
        let mapping = NameMapping::from_pairs([("tmp", "$1tmp")]);
        assert_eq!(mapping.apply("tmp"), "$1tmp");
    }

    #[test]
    fn entries_chain_in_declared_order() {
        let forward = NameMapping::from_pairs([("dbo.", "stage."), ("stage.", "PUBLIC.")]);
        assert_eq!(forward.apply("dbo.t"), "PUBLIC.t");

        let reversed = NameMapping::from_pairs([("stage.", "PUBLIC."), ("dbo.", "stage.")]);
        assert_eq!(reversed.apply("dbo.t"), "stage.t");
    }

    #[test]
    fn parse_ignores_lines_without_arrow_and_keeps_first_position() {
        let mapping = NameMapping::parse("a -> b\n\nnot a mapping\nc -> d\na -> e").unwrap();
        let pairs: Vec<(&str, &str)> = mapping
            .entries()
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "e"), ("c", "d")]);
    }

    #[test]
    fn parse_rejects_empty_source() {
        let err = NameMapping::parse("a -> b\n -> c").unwrap_err();
        assert_eq!(
            err,
            CanonicalError::InvalidMapping {
                line: 2,
                reason: "source must not be empty".into()
            }
        );
    }

    #[test]
    fn empty_source_pushed_directly_is_skipped() {
        let mut mapping = NameMapping::new();
        mapping.push("", "x");
        assert_eq!(mapping.apply("abc"), "abc");
    }

    #[test]
    fn serializes_as_plain_list() {
        let mapping = NameMapping::from_pairs([("dbo.", "PUBLIC.")]);
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"[{"source":"dbo.","target":"PUBLIC."}]"#);
    }
}
