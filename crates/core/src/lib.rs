//! Tradebook Core - bulk-trade CSV parsing and per-symbol summaries.
//!
//! Raw statement text flows through the `parser` module (tokenizer, header
//! mapping, row coercion), is widened into `TradeRecord`s by `trades`, and is
//! netted per symbol by `summary`. `session` holds the view-state a UI binds to.

pub mod constants;
pub mod errors;
pub mod parser;
pub mod session;
pub mod settings;
pub mod summary;
pub mod trades;

// Re-export the main entry points
pub use parser::{parse_csv_string, ParsedRow, PlainSchema, RowSchema};
pub use summary::{aggregate_trades, SummaryOrder, SymbolSummary};
pub use trades::{parse_trades, TradeAction, TradeField, TradeRecord};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
