//! CSV flattening.
//!
//! Tabular exports are compared row by row: the header row is dropped and
//! each data row becomes one line of comma-joined, unquoted field values.
//!
//! The reader follows RFC 4180 quoting (`"a,b"`, `""` for a literal quote,
//! line breaks inside quotes) and is lenient: an unterminated quote takes the
//! rest of the input as its field. Blank lines are skipped.

/// Flattens CSV text to one line per data row.
///
/// ```rust
/// use ingest::flatten_csv;
///
/// let csv = "id,name\n1,\"Smith, J\"\n\n2,Lee\n";
/// assert_eq!(flatten_csv(csv), "1,Smith, J\n2,Lee");
/// ```
pub fn flatten_csv(text: &str) -> String {
    let rows = parse_rows(text);
    rows.iter()
        .skip(1)
        .map(|fields| fields.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses CSV into rows of fields, skipping blank lines.
pub(crate) fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Whether the current row has seen any character, quoted or not.
    let mut row_started = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                row_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if row_started {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                row_started = false;
            }
            _ => {
                field.push(c);
                row_started = true;
            }
        }
    }
    if row_started {
        row.push(field);
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_dropped() {
        assert_eq!(flatten_csv("a,b\n1,2\n3,4"), "1,2\n3,4");
        assert_eq!(flatten_csv("a,b\n"), "");
        assert_eq!(flatten_csv(""), "");
    }

    #[test]
    fn quoted_fields_are_unquoted() {
        let rows = parse_rows("x,y\n\"he said \"\"hi\"\"\",\"multi\nline\"\r\n");
        assert_eq!(
            rows[1],
            vec!["he said \"hi\"".to_string(), "multi\nline".to_string()]
        );
    }

    #[test]
    fn blank_lines_and_crlf_are_skipped() {
        assert_eq!(flatten_csv("h\r\n\r\n1\r\n\r\n2\r\n"), "1\n2");
    }

    #[test]
    fn empty_fields_survive() {
        assert_eq!(flatten_csv("a,b,c\n,,x\n"), ",,x");
        assert_eq!(flatten_csv("a\n\"\"\n"), "");
        assert_eq!(parse_rows("a\n\"\"\n").len(), 2);
    }

    #[test]
    fn unterminated_quote_takes_the_rest() {
        let rows = parse_rows("h\n\"open,field\nmore");
        assert_eq!(rows, vec![vec!["h".to_string()], vec!["open,field\nmore".to_string()]]);
    }
}
