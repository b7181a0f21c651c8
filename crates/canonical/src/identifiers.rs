//! Delimited-identifier handling.
//!
//! T-SQL quotes identifiers with square brackets, MySQL-flavoured sources with
//! back-quotes. For comparison both delimiters are dropped; for translation
//! brackets become ANSI double quotes.
//!
//! A `[` is paired with the `]` that closes it, counting nested brackets. A
//! group is rewritten only when it encloses a non-empty run with no delimiter
//! of its own; nested groups such as `[[x]]` or ``[`x`]`` are copied through
//! whole, and an unterminated delimiter is an ordinary character. Single-quoted
//! string literals are skipped so patterns such as `LIKE '[a-z]%'` keep their
//! brackets.
//!
//! The comparison form also keeps a group when dropping it would glue a `-`
//! or `/` onto its neighbour and spell a new comment marker, and it pairs
//! delimiters across line breaks, so running it again over collapsed output
//! finds nothing left to do. The translation form never crosses a line break.

use once_cell::sync::Lazy;
use regex::Regex;

static LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A'(?:[^']|'')*'").expect("string literal pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// `[X]` and `` `X` `` become `X`.
    Bare,
    /// `[X]` becomes `"X"`; back-quotes are ordinary text.
    AnsiQuoted,
}

/// Replaces `[X]` and `` `X` `` with a bare `X`.
///
/// ```rust
/// use canonical::drop_identifier_quotes;
///
/// assert_eq!(drop_identifier_quotes("SELECT [Id] FROM `orders`"), "SELECT Id FROM orders");
/// assert_eq!(drop_identifier_quotes("[[x]]"), "[[x]]");
/// ```
pub fn drop_identifier_quotes(text: &str) -> String {
    rewrite_delimited(text, Target::Bare)
}

/// Replaces `[X]` with `"X"`, the ANSI quoted-identifier form.
///
/// ```rust
/// use canonical::brackets_to_double_quotes;
///
/// assert_eq!(brackets_to_double_quotes("dbo.[Order Lines]"), "dbo.\"Order Lines\"");
/// ```
pub fn brackets_to_double_quotes(text: &str) -> String {
    rewrite_delimited(text, Target::AnsiQuoted)
}

fn rewrite_delimited(text: &str, target: Target) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(c) = text[pos..].chars().next() {
        let rest = &text[pos..];
        if c == '\'' {
            if let Some(literal) = LITERAL_RE.find(rest) {
                out.push_str(literal.as_str());
                pos += literal.end();
                continue;
            }
        }
        if let Some(len) = group_len(rest, target) {
            let group = &rest[..len];
            let inner = &group[1..len - 1];
            match target {
                Target::Bare
                    if is_plain(inner, target)
                        && !joins_comment_marker(&out, inner, &rest[len..]) =>
                {
                    out.push_str(inner);
                }
                Target::AnsiQuoted if is_plain(inner, target) => {
                    out.push('"');
                    out.push_str(inner);
                    out.push('"');
                }
                _ => out.push_str(group),
            }
            pos += len;
            continue;
        }
        out.push(c);
        pos += c.len_utf8();
    }
    out
}

/// Byte length of the delimited group opening at the start of `rest`.
fn group_len(rest: &str, target: Target) -> Option<usize> {
    let crosses_lines = target == Target::Bare;
    match rest.as_bytes().first()? {
        b'[' => {
            let mut depth = 0usize;
            for (i, b) in rest.bytes().enumerate() {
                match b {
                    b'[' => depth += 1,
                    b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    b'\n' | b'\r' if !crosses_lines => return None,
                    _ => {}
                }
            }
            None
        }
        b'`' if target == Target::Bare => rest[1..].find('`').map(|i| i + 2),
        _ => None,
    }
}

fn is_plain(inner: &str, target: Target) -> bool {
    let nested = match target {
        Target::Bare => inner.contains(['[', ']', '`', '\'']),
        Target::AnsiQuoted => inner.contains(['[', ']']),
    };
    !inner.is_empty() && !nested
}

/// True when `inner` spliced between `before` and `after` would form `--` or
/// `/*` across a splice point.
fn joins_comment_marker(before: &str, inner: &str, after: &str) -> bool {
    let marker = |left: Option<char>, right: Option<char>| {
        matches!((left, right), (Some('-'), Some('-')) | (Some('/'), Some('*')))
    };
    marker(before.chars().next_back(), inner.chars().next())
        || marker(inner.chars().next_back(), after.chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_brackets_and_backquotes() {
        assert_eq!(
            drop_identifier_quotes("[dbo].[Orders] JOIN `sales`.`lines`"),
            "dbo.Orders JOIN sales.lines"
        );
    }

    #[test]
    fn unterminated_bracket_left_alone() {
        assert_eq!(drop_identifier_quotes("SELECT [Id FROM t"), "SELECT [Id FROM t");
        assert_eq!(
            brackets_to_double_quotes("SELECT [Id\nFROM t]"),
            "SELECT [Id\nFROM t]"
        );
    }

    #[test]
    fn nested_delimiters_are_left_as_is() {
        for sql in ["[[x]]", "[`x`]", "`[x]`", "[ [x] ]", "[]"] {
            assert_eq!(drop_identifier_quotes(sql), sql);
        }
        assert_eq!(drop_identifier_quotes("[a [b] c"), "[a b c");
        assert_eq!(drop_identifier_quotes("x] [y]"), "x] y");
        assert_eq!(brackets_to_double_quotes("[[x]] [y]"), "[[x]] \"y\"");
    }

    #[test]
    fn comparison_form_pairs_across_lines() {
        assert_eq!(drop_identifier_quotes("[Order\nLines]"), "Order\nLines");
        assert_eq!(drop_identifier_quotes("`a\nb`"), "a\nb");
    }

    #[test]
    fn dropping_never_spells_a_comment_marker() {
        assert_eq!(drop_identifier_quotes("a -[-x]"), "a -[-x]");
        assert_eq!(drop_identifier_quotes("[x-]-1"), "[x-]-1");
        assert_eq!(drop_identifier_quotes("a /[*x]"), "a /[*x]");
        assert_eq!(drop_identifier_quotes("[a/]*"), "[a/]*");
        assert_eq!(drop_identifier_quotes("[a-][-b]"), "a-[-b]");
        assert_eq!(drop_identifier_quotes("a - [-x]"), "a - -x");
    }

    #[test]
    fn string_literals_keep_their_brackets() {
        let sql = "WHERE [Code] LIKE '[A-Z]%'";
        assert_eq!(drop_identifier_quotes(sql), "WHERE Code LIKE '[A-Z]%'");
        assert_eq!(
            brackets_to_double_quotes(sql),
            "WHERE \"Code\" LIKE '[A-Z]%'"
        );
        assert_eq!(drop_identifier_quotes("[it's] 'x [y]'"), "[it's] 'x [y]'");
    }

    #[test]
    fn dropping_twice_changes_nothing() {
        for sql in ["[[x]]", "[`x`]", "`a` [[b] c]] `d", "-[-x] [y]", "[a\nb] [c]]"] {
            let once = drop_identifier_quotes(sql);
            assert_eq!(drop_identifier_quotes(&once), once, "input {sql:?}");
        }
    }

    #[test]
    fn back_quotes_untouched_by_translation_form() {
        assert_eq!(brackets_to_double_quotes("`a`.[b]"), "`a`.\"b\"");
    }
}
