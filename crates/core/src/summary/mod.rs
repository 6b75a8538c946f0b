//! Summary module - per-symbol net positions built from trade records.

mod summary_model;
mod summary_service;


pub use summary_model::{ConstituentLine, SummaryOrder, SymbolSummary};
pub use summary_service::aggregate_trades;
