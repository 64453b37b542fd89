//! CSV tokenizer
//!
//! Splits raw CSV text into a header row and data rows. Handles quoted
//! fields and `""` escapes; blank lines are dropped before parsing. Rows
//! are single-line: embedded newlines inside quoted cells are not
//! supported, which matches the spreadsheets users actually upload.

use thiserror::Error;

/// File-level tokenizer failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("File is empty")]
    Empty,
    #[error("CSV file has no data rows")]
    NoDataRows,
}

/// A tokenized CSV file: one header row plus zero or more data rows
#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Tokenize raw CSV text into header and data rows.
///
/// Fails if the file has no non-blank lines, or only a header line.
pub fn tokenize(text: &str) -> Result<CsvDocument, TokenizeError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(TokenizeError::Empty)?;
    let headers = tokenize_line(header_line);

    let rows: Vec<Vec<String>> = lines.map(tokenize_line).collect();
    if rows.is_empty() {
        return Err(TokenizeError::NoDataRows);
    }

    Ok(CsvDocument { headers, rows })
}

/// Tokenize a single CSV line into cells.
///
/// A `"` toggles quoting; `""` inside quotes emits one literal quote;
/// a `,` outside quotes ends the current cell. Cells are not trimmed
/// here - trimming happens during coercion.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }

    cells.push(current);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_plain_cells() {
        assert_eq!(tokenize_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn quoted_comma_stays_in_cell() {
        let cells = tokenize_line("\"Acme, Inc\",100");
        assert_eq!(cells, vec!["Acme, Inc", "100"]);
    }

    #[test]
    fn escaped_quote_emits_literal_quote() {
        let cells = tokenize_line("\"say \"\"hi\"\"\",x");
        assert_eq!(cells, vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn trailing_empty_cell_is_kept() {
        assert_eq!(tokenize_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn empty_line_yields_single_empty_cell() {
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn blank_lines_are_dropped() {
        let doc = tokenize("a,b\n\n1,2\r\n\r\n3,4\n").unwrap();
        assert_eq!(doc.headers, vec!["a", "b"]);
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[1], vec!["3", "4"]);
    }

    #[test]
    fn crlf_line_endings() {
        let doc = tokenize("a,b\r\n1,2\r\n").unwrap();
        assert_eq!(doc.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn empty_file_is_an_error() {
        assert_eq!(tokenize("").unwrap_err(), TokenizeError::Empty);
        assert_eq!(tokenize("\n  \n").unwrap_err(), TokenizeError::Empty);
    }

    #[test]
    fn header_only_file_is_an_error() {
        assert_eq!(tokenize("a,b,c\n").unwrap_err(), TokenizeError::NoDataRows);
    }
}
