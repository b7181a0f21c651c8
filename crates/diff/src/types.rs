use serde::{Deserialize, Serialize};

/// Kind of one aligned edit operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

impl DiffTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffTag::Equal => "equal",
            DiffTag::Replace => "replace",
            DiffTag::Delete => "delete",
            DiffTag::Insert => "insert",
        }
    }
}

/// One aligned edit operation over half-open index ranges.
///
/// `a_start..a_end` indexes the first sequence, `b_start..b_end` the second.
/// A `Delete` has an empty `b` range, an `Insert` an empty `a` range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffOpcode {
    pub tag: DiffTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl DiffOpcode {
    pub fn new(tag: DiffTag, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }

    pub fn a_len(&self) -> usize {
        self.a_end - self.a_start
    }

    pub fn b_len(&self) -> usize {
        self.b_end - self.b_start
    }

    pub fn is_equal(&self) -> bool {
        self.tag == DiffTag::Equal
    }
}

/// Checks that `opcodes` cover `0..len_a` and `0..len_b` contiguously, in
/// order, with no gaps and no overlaps.
pub fn opcodes_partition(opcodes: &[DiffOpcode], len_a: usize, len_b: usize) -> bool {
    let mut i = 0;
    let mut j = 0;
    for op in opcodes {
        if op.a_start != i || op.b_start != j || op.a_end < op.a_start || op.b_end < op.b_start {
            return false;
        }
        let shape_ok = match op.tag {
            DiffTag::Equal => op.a_len() == op.b_len() && op.a_len() > 0,
            DiffTag::Replace => op.a_len() > 0 && op.b_len() > 0,
            DiffTag::Delete => op.a_len() > 0 && op.b_len() == 0,
            DiffTag::Insert => op.a_len() == 0 && op.b_len() > 0,
        };
        if !shape_ok {
            return false;
        }
        i = op.a_end;
        j = op.b_end;
    }
    i == len_a && j == len_b
}

/// Similarity of two canonical forms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CongruenceScore {
    /// Ratio in `[0, 1]`.
    pub ratio: f64,
}

impl CongruenceScore {
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
        }
    }

    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub fn percent(&self) -> f64 {
        (self.ratio * 10_000.0).round() / 100.0
    }
}

/// Result of comparing two texts line by line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineComparison {
    pub score: CongruenceScore,
    pub opcodes: Vec<DiffOpcode>,
}

impl LineComparison {
    /// Opcodes other than `Equal`.
    pub fn changes(&self) -> impl Iterator<Item = &DiffOpcode> {
        self.opcodes.iter().filter(|op| !op.is_equal())
    }
}

/// Highlight class of one inline segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMark {
    Unchanged,
    Replaced,
    Deleted,
    Inserted,
}

/// A contiguous run of tokens on one side of an inline diff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub mark: SegmentMark,
}

impl Segment {
    pub fn new(text: impl Into<String>, mark: SegmentMark) -> Self {
        Self {
            text: text.into(),
            mark,
        }
    }
}

/// Token-level highlight of one changed line pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InlineDiff {
    pub a: Vec<Segment>,
    pub b: Vec<Segment>,
}

/// Whether a side-by-side row is identical on both sides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Same,
    Changed,
}

/// One row of a side-by-side view.
///
/// `left_line`/`right_line` are zero-based line indexes; `None` marks a
/// padding cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlignedRow {
    pub status: RowStatus,
    pub left_line: Option<usize>,
    pub right_line: Option<usize>,
    pub left: Vec<Segment>,
    pub right: Vec<Segment>,
}
