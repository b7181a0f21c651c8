use crate::inline::token_diff;
use crate::line_diff;
use crate::types::{AlignedRow, DiffTag, RowStatus, Segment, SegmentMark};

/// Side-by-side rows for two texts.
///
/// Equal runs become `Same` rows. A replace run pairs lines index by index
/// and pads the shorter side with an empty line; delete and insert runs get
/// one empty side. Every `Changed` row carries the token diff of its pair.
pub fn aligned_rows(a: &str, b: &str) -> Vec<AlignedRow> {
    let a_lines: Vec<&str> = a.lines().collect();
    let b_lines: Vec<&str> = b.lines().collect();

    let mut rows = Vec::new();
    for op in line_diff(a, b) {
        match op.tag {
            DiffTag::Equal => {
                for k in 0..op.a_len() {
                    rows.push(same_row(op.a_start + k, op.b_start + k, a_lines[op.a_start + k]));
                }
            }
            DiffTag::Replace | DiffTag::Delete | DiffTag::Insert => {
                for k in 0..op.a_len().max(op.b_len()) {
                    let left_line = (k < op.a_len()).then_some(op.a_start + k);
                    let right_line = (k < op.b_len()).then_some(op.b_start + k);
                    let left_text = left_line.map_or("", |i| a_lines[i]);
                    let right_text = right_line.map_or("", |j| b_lines[j]);
                    let inline = token_diff(left_text, right_text);
                    rows.push(AlignedRow {
                        status: RowStatus::Changed,
                        left_line,
                        right_line,
                        left: inline.a,
                        right: inline.b,
                    });
                }
            }
        }
    }
    rows
}

fn same_row(left_line: usize, right_line: usize, text: &str) -> AlignedRow {
    let segments = if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment::new(text, SegmentMark::Unchanged)]
    };
    AlignedRow {
        status: RowStatus::Same,
        left_line: Some(left_line),
        right_line: Some(right_line),
        left: segments.clone(),
        right: segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_texts_give_same_rows() {
        let rows = aligned_rows("select a\nfrom t", "select a\nfrom t");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == RowStatus::Same));
        assert_eq!(rows[1].left_line, Some(1));
        assert_eq!(rows[1].right, vec![Segment::new("from t", SegmentMark::Unchanged)]);
    }

    #[test]
    fn replace_run_pads_shorter_side() {
        let rows = aligned_rows("select a\nfrom t\nwhere x", "select a\nfrom u");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].status, RowStatus::Same);

        assert_eq!(rows[1].status, RowStatus::Changed);
        assert_eq!((rows[1].left_line, rows[1].right_line), (Some(1), Some(1)));

        assert_eq!((rows[2].left_line, rows[2].right_line), (Some(2), None));
        assert!(rows[2].right.is_empty());
        assert_eq!(rows[2].left, vec![Segment::new("where x", SegmentMark::Deleted)]);
    }

    #[test]
    fn insert_rows_have_empty_left_side() {
        let rows = aligned_rows("select a", "select a\nlimit 5;");
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[1].left_line, rows[1].right_line), (None, Some(1)));
        assert!(rows[1].left.is_empty());
        assert!(rows[1]
            .right
            .iter()
            .all(|s| s.mark == SegmentMark::Inserted));
    }

    #[test]
    fn empty_inputs_give_no_rows() {
        assert!(aligned_rows("", "").is_empty());
    }
}
