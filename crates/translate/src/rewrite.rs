//! Lexical rewrites for the function, hint and cast rules.
//!
//! These are regular-expression rewrites, not a parser. Every pattern is an
//! alternation with a single-quoted string literal, so text such as
//! `'GETDATE()'` inside a literal is copied through unchanged. A `CONVERT`
//! whose expression contains parentheses is cut at the first `)`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISNULL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|\bISNULL\s*\(").expect("ISNULL pattern is valid")
});

static GETDATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|\bGETDATE\s*\(\s*\)")
        .expect("GETDATE pattern is valid")
});

static LEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|\bLEN\s*\(").expect("LEN pattern is valid")
});

// Leading blanks on the same line go with the hint so no gap is left behind.
static NOLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|[ \t]*\bWITH\s*\(\s*NOLOCK\s*\)")
        .expect("NOLOCK pattern is valid")
});

static COLLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|[ \t]*\bCOLLATE\b\s+\w+")
        .expect("COLLATE pattern is valid")
});

// CONVERT(type[(n[, m])], expr): the expression is matched lazily up to the
// first closing parenthesis on the same line.
static CONVERT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<lit>'(?:[^']|'')*')|\bCONVERT\s*\(\s*(?P<ty>[A-Za-z0-9_]+(?:\s*\(\s*(?:\d+|MAX)\s*(?:,\s*\d+\s*)?\))?)\s*,\s*(?P<expr>.*?)\)",
    )
    .expect("CONVERT pattern is valid")
});

static TERMINATOR_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r";(?:\s*;)+").expect("terminator pattern is valid"));

/// Applies `rewrite` to every match of `re` that is not the `lit` group.
fn replace_outside_literals(
    re: &Regex,
    text: &str,
    rewrite: impl Fn(&Captures<'_>) -> String,
) -> String {
    re.replace_all(text, |caps: &Captures<'_>| match caps.name("lit") {
        Some(literal) => literal.as_str().to_string(),
        None => rewrite(caps),
    })
    .into_owned()
}

pub(crate) fn isnull_to_coalesce(text: &str) -> String {
    replace_outside_literals(&ISNULL_RE, text, |_| "COALESCE(".to_string())
}

pub(crate) fn getdate_to_current_timestamp(text: &str) -> String {
    replace_outside_literals(&GETDATE_RE, text, |_| "CURRENT_TIMESTAMP".to_string())
}

pub(crate) fn len_to_length(text: &str) -> String {
    replace_outside_literals(&LEN_RE, text, |_| "LENGTH(".to_string())
}

pub(crate) fn remove_nolock(text: &str) -> String {
    replace_outside_literals(&NOLOCK_RE, text, |_| String::new())
}

pub(crate) fn remove_collate(text: &str) -> String {
    replace_outside_literals(&COLLATE_RE, text, |_| String::new())
}

pub(crate) fn convert_to_cast(text: &str) -> String {
    replace_outside_literals(&CONVERT_RE, text, |caps| {
        format!("CAST({} AS {})", caps["expr"].trim(), caps["ty"].trim())
    })
}

pub(crate) fn collapse_terminators(text: &str) -> String {
    TERMINATOR_RUN_RE.replace_all(text, ";").into_owned()
}
