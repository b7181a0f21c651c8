use fxhash::FxHashMap;

const WORD_BITS: usize = u64::BITS as usize;

/// Character-level similarity: `2 * LCS / (len_a + len_b)`.
///
/// Lengths count Unicode scalar values. Two empty strings are identical
/// (`1.0`); an empty string against a non-empty one scores `0.0`. The result
/// is exactly symmetric because the longest common subsequence is.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Length of the longest common subsequence.
///
/// Bit-parallel over the shorter sequence, 64 positions per word, so the
/// cost is `O(len_long * ceil(len_short / 64))`.
pub fn lcs_len<T: Eq + std::hash::Hash>(a: &[T], b: &[T]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let words = short.len().div_ceil(WORD_BITS);
    let mut match_masks: FxHashMap<&T, Vec<u64>> = FxHashMap::default();
    for (i, item) in short.iter().enumerate() {
        match_masks.entry(item).or_insert_with(|| vec![0; words])[i / WORD_BITS] |=
            1u64 << (i % WORD_BITS);
    }

    // A zero bit at position i means short[i] is part of the current LCS.
    let mut v = vec![u64::MAX; words];
    for item in long {
        let Some(pm) = match_masks.get(item) else {
            continue;
        };
        let mut carry = false;
        for (w, word) in v.iter_mut().enumerate() {
            let u = *word & pm[w];
            let (sum, c1) = word.overflowing_add(u);
            let (sum, c2) = sum.overflowing_add(carry as u64);
            carry = c1 || c2;
            *word = sum | (*word & !pm[w]);
        }
    }

    let tail_bits = short.len() % WORD_BITS;
    v.iter()
        .enumerate()
        .map(|(w, word)| {
            let mask = if w == words - 1 && tail_bits != 0 {
                (1u64 << tail_bits) - 1
            } else {
                u64::MAX
            };
            (!word & mask).count_ones() as usize
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        for text in ["", "a", "select 1", "SELECT *\nFROM t;"] {
            assert_eq!(similarity_ratio(text, text), 1.0, "text: {text:?}");
        }
    }

    #[test]
    fn non_empty_against_empty_scores_zero() {
        assert_eq!(similarity_ratio("select 1", ""), 0.0);
        assert_eq!(similarity_ratio("", "x"), 0.0);
    }

    #[test]
    fn ratio_is_symmetric() {
        let pairs = [
            ("abcd", "bcde"),
            ("select top 5 * from t", "select * from t limit 5;"),
            ("aaabaaacaaa", "aacaabaaaa"),
            ("qabxcd", "abycdf"),
        ];
        for (x, y) in pairs {
            assert_eq!(similarity_ratio(x, y), similarity_ratio(y, x), "{x:?} / {y:?}");
        }
    }

    #[test]
    fn lcs_matches_known_values() {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        assert_eq!(lcs_len(&chars("ab"), &chars("ba")), 1);
        assert_eq!(lcs_len(&chars("abcbdab"), &chars("bdcaba")), 4);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
    }

    #[test]
    fn lcs_spans_multiple_words() {
        let a: Vec<char> = "ab".repeat(70).chars().collect();
        let b: Vec<char> = "b".repeat(70).chars().collect();
        assert_eq!(lcs_len(&a, &b), 70);

        let long: String = "select a, b from t; ".repeat(10);
        assert_eq!(similarity_ratio(&long, &long), 1.0);
        let shifted = format!("x{long}");
        let expected = (2 * long.chars().count()) as f64 / (2 * long.chars().count() + 1) as f64;
        assert_eq!(similarity_ratio(&long, &shifted), expected);
    }

    #[test]
    fn counts_unicode_scalars() {
        assert_eq!(similarity_ratio("café", "cafe"), 0.75);
    }
}
