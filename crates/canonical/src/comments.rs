//! SQL comment stripping.
//!
//! Line comments (`--` through end of line) and block comments (`/* ... */`)
//! are matched in one left-to-right scan, so whichever marker appears first
//! owns the text that follows it. Block comments are not nested: the span
//! ends at the first `*/`. A closed block comment becomes one space so the
//! tokens on either side stay apart (`a -/**/- b` must not turn into a new
//! `--` comment). A block comment that never closes runs to the end of the
//! document and is removed outright.
//!
//! Single-quoted string literals are matched by the same scan and copied
//! through untouched, so `'--'` or `'/* x */'` inside a literal survive.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?P<lit>'(?:[^']|'')*')|--[^\n]*|/\*.*?(?P<close>\*/|\z)")
        .expect("comment pattern is valid")
});

/// Removes SQL comments, leaving line breaks after `--` comments in place.
///
/// ```rust
/// use canonical::strip_comments;
///
/// let sql = "SELECT a -- trailing\nFROM t /* block */;";
/// assert_eq!(strip_comments(sql), "SELECT a \nFROM t  ;");
/// ```
pub fn strip_comments(text: &str) -> String {
    COMMENT_RE
        .replace_all(text, |caps: &Captures<'_>| {
            if let Some(literal) = caps.name("lit") {
                return literal.as_str().to_string();
            }
            match caps.name("close") {
                Some(close) if !close.as_str().is_empty() => " ".to_string(),
                _ => String::new(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_line_comments_but_keeps_newlines() {
        let sql = "-- header\nSELECT 1 -- one\nFROM t";
        assert_eq!(strip_comments(sql), "\nSELECT 1 \nFROM t");
    }

    #[test]
    fn block_comment_stops_at_first_close() {
        let sql = "SELECT /* a */ x /* b */ FROM t";
        assert_eq!(strip_comments(sql), "SELECT   x   FROM t");
    }

    #[test]
    fn block_comment_spans_lines() {
        let sql = "SELECT x\n/* multi\nline */\nFROM t";
        assert_eq!(strip_comments(sql), "SELECT x\n \nFROM t");
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        let sql = "SELECT x /* never closed\nFROM t";
        assert_eq!(strip_comments(sql), "SELECT x ");
    }

    #[test]
    fn first_marker_wins() {
        assert_eq!(strip_comments("a /* -- */ b"), "a   b");
        assert_eq!(strip_comments("a -- /* \nb */"), "a \nb */");
    }

    #[test]
    fn removed_block_comment_keeps_neighbours_apart() {
        let sql = "a -/**/- b\nc";
        let once = strip_comments(sql);
        assert_eq!(once, "a - - b\nc");
        assert_eq!(strip_comments(&once), once);
        assert_eq!(strip_comments("a/**/b"), "a b");
    }

    #[test]
    fn markers_inside_string_literals_are_kept() {
        let sql = "SELECT '--not a comment', 'it''s /* fine */' FROM t -- gone";
        assert_eq!(
            strip_comments(sql),
            "SELECT '--not a comment', 'it''s /* fine */' FROM t "
        );
    }

    #[test]
    fn text_without_comments_is_unchanged() {
        let sql = "SELECT a - b FROM t WHERE c > 2 / 3";
        assert_eq!(strip_comments(sql), sql);
    }
}
