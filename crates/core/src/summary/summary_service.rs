use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::summary::summary_model::{SummaryOrder, SymbolSummary};
use crate::trades::TradeRecord;

/// Nets BUY against SELL quantities per symbol.
///
/// Groups keep the order in which their symbol first appears and members
/// keep upload order. Symbols whose trades cancel out exactly are left out.
/// Pure: the same input always yields the same summaries.
pub fn aggregate_trades(trades: &[TradeRecord], order: SummaryOrder) -> Vec<SymbolSummary> {
    let mut summaries: Vec<SymbolSummary> = Vec::new();
    let mut index_by_symbol: HashMap<&str, usize> = HashMap::new();

    for trade in trades {
        let idx = *index_by_symbol
            .entry(trade.symbol.as_str())
            .or_insert_with(|| {
                summaries.push(SymbolSummary {
                    symbol: trade.symbol.clone(),
                    name: trade.name.clone(),
                    quantity: Decimal::ZERO,
                    constituents: Vec::new(),
                });
                summaries.len() - 1
            });

        let summary = &mut summaries[idx];
        summary.quantity += trade.signed_quantity();
        summary.constituents.push(trade.clone());
    }

    let symbol_count = summaries.len();
    summaries.retain(|summary| !summary.quantity.is_zero());

    if order == SummaryOrder::NetQuantityDesc {
        // stable sort, ties keep first-seen order
        summaries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    }

    debug!(
        "Aggregated {} trades into {} symbols ({} netted to zero)",
        trades.len(),
        summaries.len(),
        symbol_count - summaries.len()
    );

    summaries
}
