//! Splits raw CSV text into rows of trimmed string cells.
//!
//! The content is split into lines before any field splitting, so a quote
//! never joins two lines. Quoted spans may contain commas, a trailing comma
//! yields an explicit empty trailing cell, and blank lines are dropped.

use csv::{ReaderBuilder, Trim};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::errors::CsvError;
use crate::Result;

lazy_static! {
    /// Whitespace between a delimiter (or line start) and an opening quote.
    /// Format: (^|,)\s+"
    static ref SPACE_BEFORE_QUOTE_REGEX: Regex =
        Regex::new(r#"(^|,)\s+""#).expect("Invalid regex pattern");
}

/// One tokenized line, cells in file order.
pub type RawRow = Vec<String>;

/// Tokenizes the whole file content into rows.
///
/// The content is trimmed first, so leading blank lines and trailing
/// newlines never produce rows. Both `\n` and `\r\n` end a line. A quote
/// opens a quoted span when only whitespace precedes it in the cell.
pub fn tokenize(content: &str) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    for (index, line) in content.trim().lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        rows.push(tokenize_line(line, index + 1)?);
    }

    Ok(rows)
}

/// Splits one line into trimmed cells.
fn tokenize_line(line: &str, line_number: usize) -> Result<RawRow> {
    let line = SPACE_BEFORE_QUOTE_REGEX.replace_all(line, "${1}\"");

    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(false) // the header row is mapped separately
        .flexible(true) // rows may be shorter or longer than the header
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => Ok(record.iter().map(str::to_string).collect()),
        Some(Err(e)) => Err(CsvError::Malformed {
            row: line_number,
            message: e.to_string(),
        }
        .into()),
        None => Ok(Vec::new()),
    }
}

/// Decodes file bytes to text, dropping a UTF-8 BOM if present.
///
/// Invalid UTF-8 is replaced rather than rejected; the caller still gets a
/// parse attempt and the replacement is logged.
pub fn decode_content(content: &[u8]) -> String {
    let content_without_bom = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);

    match std::str::from_utf8(content_without_bom) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!(
                "Invalid UTF-8 encoding at byte {}: {}. Some characters may be replaced.",
                e.valid_up_to(),
                e
            );
            String::from_utf8_lossy(content_without_bom).into_owned()
        }
    }
}
