use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trades::{TradeAction, TradeRecord};

/// Net position of one symbol across an upload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSummary {
    pub symbol: String,
    /// Name of the first trade seen for the symbol
    pub name: String,
    /// Σ BUY quantity − Σ SELL quantity over the constituents
    pub quantity: Decimal,
    pub constituents: Vec<TradeRecord>,
}

impl SymbolSummary {
    pub fn trade_count(&self) -> usize {
        self.constituents.len()
    }

    /// Total quantity of one side of the book.
    pub fn side_quantity(&self, action: TradeAction) -> Decimal {
        self.constituents
            .iter()
            .filter(|trade| trade.action == action)
            .map(|trade| trade.quantity)
            .sum()
    }

    /// Detail lines for the drill-down view, in upload order.
    pub fn detail_lines(&self) -> Vec<ConstituentLine> {
        self.constituents
            .iter()
            .map(|trade| ConstituentLine {
                date: trade.date_label(),
                client: trade.client.clone(),
                action: trade.action,
                signed_quantity: trade.signed_quantity(),
            })
            .collect()
    }
}

/// One row of a symbol's drill-down table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConstituentLine {
    /// `YYYY/MM/DD`, empty when the statement had no date
    pub date: String,
    pub client: String,
    pub action: TradeAction,
    /// Positive for buys, negative for sells
    pub signed_quantity: Decimal,
}

/// Ordering of the summary rows.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SummaryOrder {
    /// Order in which each symbol first appears in the upload
    #[default]
    FirstSeen,
    /// Largest net quantity first; ties keep upload order
    NetQuantityDesc,
}
