//! Trades module - trade records, header labels and the trade row schema.

mod trades_constants;
mod trades_model;
mod trades_schema;


pub use trades_constants::*;
pub use trades_model::{CellValue, HeaderLabels, TradeAction, TradeField, TradeRecord, TradeRow};
pub use trades_schema::{parse_number, parse_trade_date, parse_trades, TradeSchema};
