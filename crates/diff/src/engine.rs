use std::hash::Hash;

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::types::{DiffOpcode, DiffTag};


/// A run of equal elements: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Longest-matching-block-first sequence aligner.
///
/// The matcher finds the longest contiguous block common to both sequences,
/// then recurses on the pieces to its left and to its right. When several
/// blocks share the maximal length, the one starting earliest in `a` wins,
/// then the one starting earliest in `b`. There is no junk heuristic: every
/// element takes part in matching, so results only depend on the inputs.
///
/// Worst case is quadratic in the sequence lengths; inputs with many
/// repeated identical elements are the slow path.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: FxHashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: FxHashMap<&'a T, Vec<usize>> = FxHashMap::default();
        for (j, item) in b.iter().enumerate() {
            b2j.entry(item).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest block common to `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a block of size 0 at `(alo, blo)` when the ranges share nothing.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let mut best = MatchBlock {
            a: alo,
            b: blo,
            size: 0,
        };
        // j2len[j] = length of the block ending at a[i - 1], b[j].
        let mut j2len: FxHashMap<usize, usize> = FxHashMap::default();
        for i in alo..ahi {
            let mut next_j2len: FxHashMap<usize, usize> = FxHashMap::default();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let run = match j.checked_sub(1) {
                        Some(prev) => j2len.get(&prev).copied().unwrap_or(0),
                        None => 0,
                    } + 1;
                    next_j2len.insert(j, run);
                    if run > best.size {
                        best = MatchBlock {
                            a: i + 1 - run,
                            b: j + 1 - run,
                            size: run,
                        };
                    }
                }
            }
            j2len = next_j2len;
        }
        best
    }

    /// All matching blocks in order, adjacent blocks merged, terminated by a
    /// zero-size sentinel at `(len_a, len_b)`.
    pub fn matching_blocks(&self) -> Vec<MatchBlock> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort_unstable();

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchBlock {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }

    /// Run-length edit script turning `a` into `b`.
    ///
    /// The opcodes cover both sequences completely and in order.
    pub fn opcodes(&self) -> Vec<DiffOpcode> {
        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);
        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(DiffTag::Replace),
                (true, false) => Some(DiffTag::Delete),
                (false, true) => Some(DiffTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(DiffOpcode::new(tag, i, block.a, j, block.b));
            }
            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                opcodes.push(DiffOpcode::new(DiffTag::Equal, block.a, i, block.b, j));
            }
        }
        opcodes
    }

    /// `2 * matched / (len_a + len_b)` over the matching blocks; `1.0` when both
    /// sequences are empty.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        (2 * matched) as f64 / total as f64
    }
}
