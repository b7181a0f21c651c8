use crate::comments::strip_comments;
use crate::config::{NormalizationConfig, NormalizeStage};
use crate::document::NormalizedDocument;
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::identifiers::drop_identifier_quotes;
use crate::mapping::NameMapping;
use crate::whitespace::collapse_whitespace;

/// Main entry point. Runs the stages enabled in `cfg`, in reference order,
/// and returns the canonical comparison form.
pub fn normalize(text: &str, cfg: &NormalizationConfig, mapping: &NameMapping) -> String {
    normalize_with_stages(text, &cfg.stages(), mapping)
}

/// Runs an explicit stage list in the given order.
///
/// Stages may repeat or appear in any order; each one sees the output of the
/// previous one.
pub fn normalize_with_stages(
    text: &str,
    stages: &[NormalizeStage],
    mapping: &NameMapping,
) -> String {
    let mut out = text.to_string();
    for stage in stages {
        out = apply_stage(*stage, &out, mapping);
    }
    out
}

/// Normalizes `text` and wraps the result with its identity hash.
pub fn normalize_document(
    name: Option<&str>,
    text: &str,
    cfg: &NormalizationConfig,
    mapping: &NameMapping,
) -> Result<NormalizedDocument, CanonicalError> {
    cfg.validate()?;

    let canonical_text = normalize(text, cfg, mapping);
    let sha256_hex = hash_canonical_bytes(cfg.version, canonical_text.as_bytes());

    Ok(NormalizedDocument {
        name: name.map(str::to_string),
        canonical_text,
        sha256_hex,
        canonical_version: cfg.version,
        config: cfg.clone(),
    })
}

fn apply_stage(stage: NormalizeStage, text: &str, mapping: &NameMapping) -> String {
    match stage {
        NormalizeStage::StripComments => strip_comments(text),
        NormalizeStage::DropBracketedIdentifiers => drop_identifier_quotes(text),
        NormalizeStage::ApplyNameMapping => mapping.apply(text),
        // Locale-free Unicode lowercasing; string literals are folded too.
        NormalizeStage::Casefold => text.to_lowercase(),
        NormalizeStage::CollapseWhitespace => collapse_whitespace(text),
    }
}
