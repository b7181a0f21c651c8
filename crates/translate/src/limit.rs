//! `SELECT TOP n` to trailing `LIMIT n` migration.
//!
//! A statement is the text up to the next `;` (or the end of the document).
//! A `;` inside a single-quoted string literal or a comment does not end a
//! statement. Every `TOP n` / `TOP (n)` directly after `SELECT` or
//! `SELECT DISTINCT` outside a literal is dropped. The statement then gets
//! `LIMIT n` on its own line before its terminator, using the first `TOP`
//! value of that statement, unless it already has a `LIMIT <digits>` clause.
//! A statement without a terminator gets one.

use once_cell::sync::Lazy;
use regex::Regex;

static SELECT_TOP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<lit>'(?:[^']|'')*')|\b(?P<select>SELECT\s+(?:DISTINCT\s+)?)TOP(?:\s+(?P<n>\d+)\b|\s*\(\s*(?P<pn>\d+)\s*\))\s*",
    )
    .expect("SELECT TOP pattern is valid")
});

static EXISTING_LIMIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?P<lit>'(?:[^']|'')*')|\bLIMIT\s+\d+\b").expect("LIMIT pattern is valid")
});

// Literals and comments are matched whole so a `;` inside them is skipped.
static STATEMENT_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)'(?:[^']|'')*'|--[^\n]*|/\*.*?(?:\*/|\z)|;")
        .expect("statement terminator pattern is valid")
});

/// Byte offset of the first `;` outside literals and comments.
fn statement_end(text: &str) -> Option<usize> {
    STATEMENT_PART_RE
        .find_iter(text)
        .find(|m| m.as_str() == ";")
        .map(|m| m.start())
}

fn has_limit(statement: &str) -> bool {
    EXISTING_LIMIT_RE
        .captures_iter(statement)
        .any(|caps| caps.name("lit").is_none())
}

/// Rewritten text plus the note, or `None` when no `SELECT TOP` was found.
pub(crate) fn top_to_limit(text: &str) -> Option<(String, String)> {
    let mut first_n: Option<String> = None;
    let mut migrated = 0usize;
    let mut out = String::with_capacity(text.len() + 16);

    let mut rest = text;
    while !rest.is_empty() {
        let (body, terminator, tail) = match statement_end(rest) {
            Some(idx) => (&rest[..idx], ";", &rest[idx + 1..]),
            None => (rest, "", ""),
        };
        let (rewritten, limit) = strip_top(body);
        match limit {
            Some(n) => {
                migrated += rewritten.clauses;
                first_n.get_or_insert_with(|| n.clone());
                let body = rewritten.text.trim_end();
                out.push_str(body);
                if !has_limit(body) {
                    out.push_str("\nLIMIT ");
                    out.push_str(&n);
                }
                out.push(';');
            }
            None => {
                out.push_str(body);
                out.push_str(terminator);
            }
        }
        rest = tail;
    }

    let n = first_n?;
    let mut note = format!("Translated TOP {n} to LIMIT {n}");
    if migrated > 1 {
        note.push_str(&format!(" ({migrated} SELECT TOP clauses)"));
    }
    note.push('.');
    Some((out, note))
}

struct Stripped {
    text: String,
    clauses: usize,
}

/// Removes every `TOP` clause in one statement and returns the first value.
fn strip_top(statement: &str) -> (Stripped, Option<String>) {
    let mut first: Option<String> = None;
    let mut clauses = 0usize;
    let text = SELECT_TOP_RE
        .replace_all(statement, |caps: &regex::Captures<'_>| {
            if let Some(literal) = caps.name("lit") {
                return literal.as_str().to_string();
            }
            clauses += 1;
            if first.is_none() {
                first = caps
                    .name("n")
                    .or_else(|| caps.name("pn"))
                    .map(|m| m.as_str().to_string());
            }
            caps["select"].to_string()
        })
        .into_owned();
    (Stripped { text, clauses }, first)
}
