//! Comparison-side SQL normalizer.
//!
//! This crate turns raw SQL text into a canonical form so two documents
//! written in different dialects can be compared without tripping over
//! noise: comments, identifier quoting, schema prefixes, letter case and
//! layout.
//!
//! ## What we do
//!
//! - Comment stripping (`--` line comments, non-nesting `/* */` blocks)
//! - Identifier delimiter removal (`[X]`, `` `X` ``)
//! - Ordered, case-insensitive name mapping (`dbo.` -> `PUBLIC.`)
//! - Case folding
//! - Whitespace collapsing
//! - Versioned identity hashes of the canonical form
//!
//! The stages run in a fixed reference order (see [`DEFAULT_STAGE_ORDER`]);
//! the order is data and can be replaced per call with
//! [`normalize_with_stages`].
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no shared state. Same text, config and mapping give the
//! same canonical form on every call.
//!
//! The translator reuses the comment, identifier and mapping helpers from
//! here, but never the case folding or whitespace collapsing: those are for
//! comparison only.

mod comments;
mod config;
mod document;
mod error;
mod hash;
mod identifiers;
mod mapping;
mod pipeline;
mod whitespace;

pub use crate::comments::strip_comments;
pub use crate::config::{NormalizationConfig, NormalizeStage, DEFAULT_STAGE_ORDER};
pub use crate::document::NormalizedDocument;
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::identifiers::{brackets_to_double_quotes, drop_identifier_quotes};
pub use crate::mapping::{apply_mapping, MappingEntry, NameMapping};
pub use crate::pipeline::{normalize, normalize_document, normalize_with_stages};
pub use crate::whitespace::collapse_whitespace;
