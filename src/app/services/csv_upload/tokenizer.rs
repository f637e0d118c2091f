//! Quote-aware CSV tokenizing
//!
//! Splits full file contents into rows of fields in a single left-to-right
//! pass. Doubled quotes inside a quoted field produce one literal quote, and
//! separators or line breaks inside quotes belong to the field.

use crate::app::models::RawTable;
use crate::constants::BOM;
use std::mem;

/// Tokenize CSV text into rows of trimmed fields
///
/// A `\r\n` pair counts as a single line break. Rows consisting of one empty
/// field (blank lines) are dropped, so empty input yields an empty table.
pub fn tokenize(text: &str) -> RawTable {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

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
            ',' if !in_quotes => row.push(mem::take(&mut current)),
            '\n' | '\r' if !in_quotes => {
                row.push(mem::take(&mut current));
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                rows.push(mem::take(&mut row));
            }
            _ => current.push(ch),
        }
    }

    // Flush a final row without a trailing line break
    if !current.is_empty() || !row.is_empty() {
        row.push(current);
        rows.push(row);
    }

    rows.into_iter()
        .map(|fields| fields.iter().map(|f| trim_field(f).to_string()).collect::<Vec<_>>())
        .filter(|fields| !is_blank_row(fields))
        .collect()
}

/// Trim whitespace and byte-order marks from both ends of a field
pub fn trim_field(field: &str) -> &str {
    field.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

fn is_blank_row(fields: &[String]) -> bool {
    fields.len() == 1 && fields[0].is_empty()
}
