//! Whitespace normalization.
//!
//! Collapsing merges lines, so it is a comparison-only transform: translated
//! SQL keeps its original layout and never passes through here.

/// Collapses every run of Unicode whitespace (newlines included) into one
/// ASCII space and trims both ends.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  SELECT\n\t1  "), "SELECT 1");
/// assert_eq!(collapse_whitespace(" \r\n "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}
