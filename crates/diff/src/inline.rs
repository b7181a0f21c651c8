use crate::engine::SequenceMatcher;
use crate::types::{DiffTag, InlineDiff, Segment, SegmentMark};

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits a line into alternating runs of word characters (letters, digits,
/// `_`) and non-word characters. Concatenating the tokens gives back the
/// line; no token is empty.
pub fn tokenize_inline(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;
    for (idx, c) in line.char_indices() {
        let word = is_word_char(c);
        match current {
            Some(kind) if kind == word => {}
            Some(_) => {
                tokens.push(&line[start..idx]);
                start = idx;
                current = Some(word);
            }
            None => current = Some(word),
        }
    }
    if start < line.len() {
        tokens.push(&line[start..]);
    }
    tokens
}

/// Token-level highlight of a changed line pair.
///
/// Both lines are tokenized with [`tokenize_inline`] and aligned with the
/// same matcher as the line diff. Matched runs come back `Unchanged`;
/// unmatched runs are `Replaced`/`Deleted` on the `a` side and
/// `Replaced`/`Inserted` on the `b` side. Joining each side's segment texts
/// reproduces the original line.
pub fn token_diff(a_line: &str, b_line: &str) -> InlineDiff {
    let a_tokens = tokenize_inline(a_line);
    let b_tokens = tokenize_inline(b_line);
    let matcher = SequenceMatcher::new(&a_tokens, &b_tokens);

    let mut out = InlineDiff::default();
    for op in matcher.opcodes() {
        let a_text = a_tokens[op.a_start..op.a_end].concat();
        let b_text = b_tokens[op.b_start..op.b_end].concat();
        let (a_mark, b_mark) = match op.tag {
            DiffTag::Equal => (SegmentMark::Unchanged, SegmentMark::Unchanged),
            DiffTag::Replace => (SegmentMark::Replaced, SegmentMark::Replaced),
            DiffTag::Delete => (SegmentMark::Deleted, SegmentMark::Inserted),
            DiffTag::Insert => (SegmentMark::Deleted, SegmentMark::Inserted),
        };
        if !a_text.is_empty() {
            out.a.push(Segment::new(a_text, a_mark));
        }
        if !b_text.is_empty() {
            out.b.push(Segment::new(b_text, b_mark));
        }
    }
    out
}
