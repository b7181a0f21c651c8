//! # SQL Diff (`diff`)
//!
//! ## Purpose
//!
//! `diff` compares two canonicalized SQL texts. It answers three questions:
//! how similar are they overall, which lines changed, and where inside a
//! changed line the difference sits.
//!
//! ## Core Types
//!
//! - [`CongruenceScore`]: character-level similarity in `[0, 1]`, reported
//!   as a two-decimal percentage.
//! - [`DiffOpcode`]: one `equal | replace | delete | insert` run over index
//!   ranges of both sequences. A full opcode list always partitions both
//!   inputs (see [`opcodes_partition`]).
//! - [`SequenceMatcher`]: the longest-matching-block-first aligner behind
//!   both the line diff and the token diff.
//! - [`InlineDiff`] / [`AlignedRow`]: token-level highlights and
//!   side-by-side display rows.
//!
//! ## Example Usage
//!
//! ```
//! use diff::{compare_lines, DiffTag};
//!
//! let cmp = compare_lines("select a\nfrom t", "select a\nfrom u");
//! assert!(cmp.score.ratio > 0.8);
//! assert_eq!(cmp.opcodes[1].tag, DiffTag::Replace);
//! ```
//!
//! Everything here is a pure function of its inputs. Alignment is quadratic
//! in the worst case, so callers bound input sizes before diffing.

mod engine;
mod inline;
mod ratio;
mod rows;
mod types;

pub use crate::engine::{MatchBlock, SequenceMatcher};
pub use crate::inline::{token_diff, tokenize_inline};
pub use crate::ratio::{lcs_len, similarity_ratio};
pub use crate::rows::aligned_rows;
pub use crate::types::{
    opcodes_partition, AlignedRow, CongruenceScore, DiffOpcode, DiffTag, InlineDiff,
    LineComparison, RowStatus, Segment, SegmentMark,
};

/// Line-level opcodes turning `a` into `b`.
///
/// Lines are split on `\n` (a trailing `\r` is dropped), and a trailing
/// newline does not produce an extra empty line.
pub fn line_diff(a: &str, b: &str) -> Vec<DiffOpcode> {
    let a_lines: Vec<&str> = a.lines().collect();
    let b_lines: Vec<&str> = b.lines().collect();
    SequenceMatcher::new(&a_lines, &b_lines).opcodes()
}

/// Similarity score plus line opcodes for two texts.
pub fn compare_lines(a: &str, b: &str) -> LineComparison {
    LineComparison {
        score: CongruenceScore::new(similarity_ratio(a, b)),
        opcodes: line_diff(a, b),
    }
}
