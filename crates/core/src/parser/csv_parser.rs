//! Schema-driven CSV parsing.
//!
//! `parse_csv_string` is the single parse entry point. What a column label
//! means and how a cell is coerced is decided by a `RowSchema`, so domain
//! rules plug in without touching the tokenizer.

use std::fmt;

use log::{debug, warn};
use serde::{Serialize, Serializer};

use crate::errors::CsvError;
use crate::parser::csv_tokenizer::tokenize;
use crate::parser::header_mapper::{clean_cell, map_headers};
use crate::Result;

/// Hooks that give meaning to the columns of a CSV file.
///
/// Only the label and value parsers are mandatory; both validation hooks
/// accept everything by default. Hook errors are plain messages; the parser
/// attaches the header or row they belong to.
pub trait RowSchema {
    /// Canonical name a raw column label maps to.
    type Header: Clone + PartialEq + fmt::Display;
    /// Coerced cell value.
    type Value;

    /// Maps a cleaned column label to its canonical header, `None` if unknown.
    fn parse_column_label(&self, label: &str) -> Option<Self::Header>;

    /// Coerces a cleaned cell. The error names what was expected, e.g. "a number".
    fn parse_row_value(
        &self,
        header: &Self::Header,
        value: &str,
    ) -> std::result::Result<Self::Value, String>;

    fn validate_header(&self, _header: &Self::Header) -> std::result::Result<(), String> {
        Ok(())
    }

    fn validate_row(
        &self,
        _row: &ParsedRow<Self::Header, Self::Value>,
        _row_number: usize,
    ) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Identity schema: labels become headers as-is and cells stay strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSchema;

impl RowSchema for PlainSchema {
    type Header = String;
    type Value = String;

    fn parse_column_label(&self, label: &str) -> Option<String> {
        Some(label.to_string())
    }

    fn parse_row_value(&self, _header: &String, value: &str) -> std::result::Result<String, String> {
        Ok(value.to_string())
    }
}

/// One content row as ordered `(header, value)` pairs.
///
/// Serializes as a map keyed by header.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow<H, V> {
    cells: Vec<(H, V)>,
}

impl<H, V> ParsedRow<H, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, header: H, value: V) {
        self.cells.push((header, value));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&H, &V)> {
        self.cells.iter().map(|(h, v)| (h, v))
    }

    pub fn into_cells(self) -> Vec<(H, V)> {
        self.cells
    }
}

impl<H: PartialEq, V> ParsedRow<H, V> {
    /// Returns the value under `header`, if the row has that column.
    pub fn get(&self, header: &H) -> Option<&V> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, value)| value)
    }
}

impl<H: Serialize, V: Serialize> Serialize for ParsedRow<H, V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.cells.iter().map(|(h, v)| (h, v)))
    }
}

/// Parses CSV text into one `ParsedRow` per content line.
///
/// The first row is the header. Content rows are numbered from 1 in errors.
/// Cells past the last header are ignored; a short row simply lacks the
/// trailing headers. Any error aborts the whole parse.
///
/// # Errors
/// * `CsvError::Empty` when there is no header column or no content row
/// * `CsvError::UnknownHeader` / `CsvError::DuplicateHeader` from the header row
/// * `CsvError::Coercion` when the schema rejects a cell
/// * `CsvError::HeaderValidation` / `CsvError::RowValidation` from the hooks
pub fn parse_csv_string<S: RowSchema>(
    content: &str,
    schema: &S,
) -> Result<Vec<ParsedRow<S::Header, S::Value>>> {
    let mut rows = tokenize(content)?.into_iter();

    // the first row is expected to be the header of the CSV
    let header_row = rows.next().unwrap_or_default();
    let headers = map_headers(&header_row, schema)?;

    let mut body = Vec::new();
    for (idx, raw_row) in rows.enumerate() {
        let row_number = idx + 1;

        if raw_row.len() > headers.len() {
            warn!(
                "Row {} has {} columns, expected {}. Extra columns ignored.",
                row_number,
                raw_row.len(),
                headers.len()
            );
        }

        let mut row = ParsedRow::with_capacity(headers.len());
        for (header, cell) in headers.iter().zip(raw_row.iter()) {
            let value = clean_cell(cell);
            match schema.parse_row_value(header, &value) {
                Ok(parsed) => row.push(header.clone(), parsed),
                Err(expected) => {
                    return Err(CsvError::Coercion {
                        row: row_number,
                        header: header.to_string(),
                        value,
                        expected,
                    }
                    .into())
                }
            }
        }

        schema
            .validate_row(&row, row_number)
            .map_err(|message| CsvError::RowValidation {
                row: row_number,
                message,
            })?;

        body.push(row);
    }

    if headers.is_empty() || body.is_empty() {
        return Err(CsvError::Empty.into());
    }

    debug!(
        "Parsed {} CSV rows across {} columns",
        body.len(),
        headers.len()
    );

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    /// Reads every cell as an integer and rejects rows summing above 100.
    struct CappedIntegers;

    impl RowSchema for CappedIntegers {
        type Header = String;
        type Value = i64;

        fn parse_column_label(&self, label: &str) -> Option<String> {
            Some(label.to_lowercase())
        }

        fn parse_row_value(&self, _header: &String, value: &str) -> std::result::Result<i64, String> {
            value.parse().map_err(|_| "an integer".to_string())
        }

        fn validate_row(
            &self,
            row: &ParsedRow<String, i64>,
            _row_number: usize,
        ) -> std::result::Result<(), String> {
            let total: i64 = row.iter().map(|(_, v)| *v).sum();
            if total > 100 {
                return Err(format!("total {} exceeds 100", total));
            }
            Ok(())
        }
    }

    #[test]
    fn test_parse_simple_csv() {
        let rows = parse_csv_string("name,age,city\nAlice,30,NYC\nBob,25,LA", &PlainSchema).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(&"name".to_string()), Some(&"Alice".to_string()));
        assert_eq!(rows[1].get(&"city".to_string()), Some(&"LA".to_string()));
    }

    #[test]
    fn test_header_order_governs_cells() {
        let rows = parse_csv_string("b,a\n2,1", &PlainSchema).unwrap();
        let cells = rows[0].clone().into_cells();
        assert_eq!(
            cells,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_quotes_are_stripped_from_values() {
        let rows = parse_csv_string("name,note\n\"Alice\",\"Hello, World\"", &PlainSchema).unwrap();
        assert_eq!(
            rows[0].get(&"note".to_string()),
            Some(&"Hello, World".to_string())
        );
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = parse_csv_string("name,age\n", &PlainSchema).unwrap_err();
        assert!(matches!(err, Error::Csv(CsvError::Empty)));
    }

    #[test]
    fn test_blank_content_is_empty() {
        let err = parse_csv_string("  \n ", &PlainSchema).unwrap_err();
        assert!(matches!(err, Error::Csv(CsvError::Empty)));
    }

    #[test]
    fn test_extra_cells_ignored_short_rows_kept() {
        let rows = parse_csv_string("a,b\n1,2,3\n4", &PlainSchema).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[1].get(&"b".to_string()), None);
    }

    #[test]
    fn test_coercion_error_carries_row_number() {
        let err = parse_csv_string("A,B\n1,2\n3,x", &CappedIntegers).unwrap_err();
        match err {
            Error::Csv(CsvError::Coercion {
                row,
                header,
                value,
                expected,
            }) => {
                assert_eq!(row, 2);
                assert_eq!(header, "b");
                assert_eq!(value, "x");
                assert_eq!(expected, "an integer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_row_hook_rejects_whole_file() {
        let err = parse_csv_string("A,B\n1,2\n60,50\n3,4", &CappedIntegers).unwrap_err();
        assert!(matches!(
            err,
            Error::Csv(CsvError::RowValidation { row: 2, ref message }) if message == "total 110 exceeds 100"
        ));
    }

    #[test]
    fn test_parse_is_repeatable() {
        let content = "A,B\n1,2\n3,4";
        let first = parse_csv_string(content, &CappedIntegers).unwrap();
        let second = parse_csv_string(content, &CappedIntegers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parsed_row_serializes_as_map() {
        let rows = parse_csv_string("b,a\n2,1", &PlainSchema).unwrap();
        let json = serde_json::to_string(&rows[0]).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
