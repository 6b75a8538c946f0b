//! Row schema for bulk-trade statements.
//!
//! Maps column labels through `HeaderLabels` and coerces cells by field:
//! quantities and prices become decimals, dates are read with an explicit
//! chrono format, everything else is kept as text.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::SOURCE_DATE_FORMAT;
use crate::parser::{parse_csv_string, RowSchema};
use crate::trades::trades_model::{CellValue, HeaderLabels, TradeField, TradeRecord, TradeRow};
use crate::Result;

/// `RowSchema` for trade statements.
#[derive(Debug, Clone)]
pub struct TradeSchema<'a> {
    labels: &'a HeaderLabels,
    date_format: &'a str,
}

impl<'a> TradeSchema<'a> {
    /// Schema reading dates as `DD-MMM-YY`.
    pub fn new(labels: &'a HeaderLabels) -> Self {
        Self {
            labels,
            date_format: SOURCE_DATE_FORMAT,
        }
    }

    /// Overrides the chrono format used for the date column.
    pub fn with_date_format(mut self, date_format: &'a str) -> Self {
        self.date_format = date_format;
        self
    }
}

impl RowSchema for TradeSchema<'_> {
    type Header = TradeField;
    type Value = CellValue;

    fn parse_column_label(&self, label: &str) -> Option<TradeField> {
        self.labels.field_for(label)
    }

    fn parse_row_value(
        &self,
        header: &TradeField,
        value: &str,
    ) -> std::result::Result<CellValue, String> {
        match header {
            field if field.is_numeric() => {
                if value.is_empty() {
                    Ok(CellValue::Empty)
                } else {
                    parse_number(value).map(CellValue::Number)
                }
            }
            TradeField::Date => {
                if value.is_empty() {
                    Ok(CellValue::Empty)
                } else {
                    parse_trade_date(value, self.date_format).map(CellValue::Date)
                }
            }
            _ => Ok(CellValue::Text(value.trim().to_string())),
        }
    }
}

/// Parses a number that may carry thousands separators or stray quotes.
///
/// `"1,234"` and `1,234.50` both parse; scientific notation is accepted.
/// The error describes what was expected.
pub fn parse_number(value: &str) -> std::result::Result<Decimal, String> {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != ',' && *c != '"')
        .collect();
    let cleaned = cleaned.trim();

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| "a number".to_string())
}

/// Parses a date with an explicit chrono format.
///
/// Month abbreviations are matched in English regardless of the system
/// locale, e.g. `05-Jan-23` with `%d-%b-%y` is 2023-01-05.
pub fn parse_trade_date(value: &str, date_format: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), date_format)
        .map_err(|_| format!("a date in '{}' format", date_format))
}

/// Parses statement text straight into trade records.
///
/// Fails fast: the first bad header, cell or row aborts the whole file.
pub fn parse_trades(content: &str, schema: &TradeSchema<'_>) -> Result<Vec<TradeRecord>> {
    let rows: Vec<TradeRow> = parse_csv_string(content, schema)?;

    let trades = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| TradeRecord::try_from_row(row, idx + 1))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} trades", trades.len());
    Ok(trades)
}
