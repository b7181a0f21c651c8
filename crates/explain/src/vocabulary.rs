use std::collections::BTreeSet;

/// Lowercased word tokens (letters, digits, `_`) of at least `min_chars`
/// characters, sorted and deduplicated.
pub fn word_tokens(text: &str, min_chars: usize) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| word.chars().count() >= min_chars)
        .map(str::to_lowercase)
        .collect()
}

/// The first `max_listed` tokens of `a` missing from `b`, in lexicographic
/// order.
pub fn only_in<'a>(
    a: &'a BTreeSet<String>,
    b: &'a BTreeSet<String>,
    max_listed: usize,
) -> Vec<&'a str> {
    a.difference(b).take(max_listed).map(String::as_str).collect()
}
