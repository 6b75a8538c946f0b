//! Core error types for the Tradebook crate.
//!
//! Every parser failure aborts the whole file, so the variants carry enough
//! position information (row, column) to be shown to the user verbatim.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tradebook crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Csv(#[from] CsvError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Failed to read file: {0}")]
    Io(String),
}

/// Errors raised while turning CSV text into typed rows.
///
/// Row numbers count content rows from 1: the line right after the header is
/// row 1. Column numbers are 1-based as well.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("CSV cannot be empty")]
    Empty,

    #[error("CSV contains unexpected header '{header}' in column {column}")]
    UnknownHeader { column: usize, header: String },

    #[error("CSV contains 1 or more headers with same name: '{header}'")]
    DuplicateHeader { header: String },

    #[error("Invalid header '{header}': {message}")]
    HeaderValidation { header: String, message: String },

    #[error("Row {row}: {message}")]
    RowValidation { row: usize, message: String },

    #[error("Row {row}: cannot read '{value}' as {expected} for column '{header}'")]
    Coercion {
        row: usize,
        header: String,
        value: String,
        expected: String,
    },

    #[error("Row {row}: required field '{field}' is missing")]
    MissingField { row: usize, field: String },

    #[error("Row {row}: unknown action '{action}', expected BUY or SELL")]
    InvalidAction { row: usize, action: String },

    #[error("Row {row} is malformed: {message}")]
    Malformed { row: usize, message: String },

    #[error("Unsupported file '{0}', expected a .csv file")]
    UnsupportedFile(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigIO(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
