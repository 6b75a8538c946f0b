//! CSV parsing module - tokenizer, header mapping and the schema-driven parser.

mod csv_parser;
mod csv_tokenizer;
mod header_mapper;

pub use csv_parser::{parse_csv_string, ParsedRow, PlainSchema, RowSchema};
pub use csv_tokenizer::{decode_content, tokenize, RawRow};
pub use header_mapper::{clean_cell, map_headers};
