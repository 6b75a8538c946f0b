//! Maps the raw header row to canonical headers.

use crate::errors::CsvError;
use crate::parser::csv_parser::RowSchema;
use crate::Result;

/// Removes every quote character from a cell and trims it.
pub fn clean_cell(cell: &str) -> String {
    cell.replace('"', "").trim().to_string()
}

/// Translates each raw header label through the schema.
///
/// The returned headers are position-aligned with the input: cell `i` of every
/// content row belongs to header `i`. Fails on a label the schema does not
/// know, on a canonical header seen twice, or when the schema's header hook
/// rejects a header.
pub fn map_headers<S: RowSchema>(raw_headers: &[String], schema: &S) -> Result<Vec<S::Header>> {
    let mut headers: Vec<S::Header> = Vec::with_capacity(raw_headers.len());

    for (idx, raw) in raw_headers.iter().enumerate() {
        let label = clean_cell(raw);
        let header = schema
            .parse_column_label(&label)
            .ok_or_else(|| CsvError::UnknownHeader {
                column: idx + 1,
                header: label.clone(),
            })?;

        if headers.contains(&header) {
            return Err(CsvError::DuplicateHeader {
                header: header.to_string(),
            }
            .into());
        }

        schema
            .validate_header(&header)
            .map_err(|message| CsvError::HeaderValidation {
                header: header.to_string(),
                message,
            })?;

        headers.push(header);
    }

    Ok(headers)
}
