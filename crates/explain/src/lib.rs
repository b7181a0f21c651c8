//! Difference explainer.
//!
//! Given the raw text of a T-SQL document (`a`) and a Snowflake document
//! (`b`), reports in dialect terms why they still differ:
//!
//! 1. **Constructs.** Each entry of [`CONSTRUCTS`] that matches `a` but not
//!    `b` yields its message, in table order. The check is one-directional:
//!    a construct found only in `b` is not reported.
//! 2. **Vocabulary.** Words of at least [`VOCABULARY_MIN_TOKEN_CHARS`]
//!    characters found on one side only, case-folded and sorted, capped at
//!    [`VOCABULARY_MAX_LISTED`] per side. At most one message per side.
//!
//! ```rust
//! let items = explain::explain("SELECT TOP 5 * FROM orders", "SELECT * FROM orders LIMIT 5");
//! assert_eq!(items.len(), 2);
//! assert!(items[0].starts_with("SELECT TOP n"));
//! assert_eq!(items[1], "Tokens only in B: limit");
//! ```

use serde::{Deserialize, Serialize};

mod config;
mod constructs;
mod vocabulary;

pub use crate::config::{
    ExplainConfig, ExplainError, VOCABULARY_MAX_LISTED, VOCABULARY_MIN_TOKEN_CHARS,
};
pub use crate::constructs::{construct_for, Construct, ConstructId, CONSTRUCTS};
pub use crate::vocabulary::{only_in, word_tokens};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationKind {
    Construct(ConstructId),
    OnlyInA,
    OnlyInB,
}

/// One line of the explanation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExplanationItem {
    pub kind: ExplanationKind,
    pub message: String,
}

/// Explanation messages with the default cutoffs.
pub fn explain(a: &str, b: &str) -> Vec<String> {
    explain_with(a, b, &ExplainConfig::default())
        .into_iter()
        .map(|item| item.message)
        .collect()
}

/// Explanation items with explicit cutoffs.
///
/// An empty side simply has no constructs and no vocabulary.
pub fn explain_with(a: &str, b: &str, cfg: &ExplainConfig) -> Vec<ExplanationItem> {
    let mut items: Vec<ExplanationItem> = CONSTRUCTS
        .iter()
        .filter(|c| c.is_present(a) && !c.is_present(b))
        .map(|c| ExplanationItem {
            kind: ExplanationKind::Construct(c.id),
            message: c.message.to_string(),
        })
        .collect();

    let tokens_a = word_tokens(a, cfg.min_token_chars);
    let tokens_b = word_tokens(b, cfg.min_token_chars);

    let only_a = only_in(&tokens_a, &tokens_b, cfg.max_listed);
    if !only_a.is_empty() {
        items.push(ExplanationItem {
            kind: ExplanationKind::OnlyInA,
            message: format!("Tokens only in A: {}", only_a.join(", ")),
        });
    }
    let only_b = only_in(&tokens_b, &tokens_a, cfg.max_listed);
    if !only_b.is_empty() {
        items.push(ExplanationItem {
            kind: ExplanationKind::OnlyInB,
            message: format!("Tokens only in B: {}", only_b.join(", ")),
        });
    }
    items
}
