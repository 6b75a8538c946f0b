use crate::trades::trades_model::TradeField;

/// Purchase of a security. Adds to the symbol's net quantity.
pub const ACTION_BUY: &str = "BUY";

/// Disposal of a security. Subtracts from the symbol's net quantity.
pub const ACTION_SELL: &str = "SELL";

/// Column labels of the exchange bulk-deal export, per canonical field.
pub const DEFAULT_HEADER_LABELS: [(TradeField, &str); 8] = [
    (TradeField::Date, "Date"),
    (TradeField::Symbol, "Symbol"),
    (TradeField::Name, "Security Name"),
    (TradeField::Client, "Client Name"),
    (TradeField::Action, "Buy/Sell"),
    (TradeField::Quantity, "Quantity Traded"),
    (TradeField::Price, "Trade Price / Wght. Avg. Price"),
    (TradeField::Remarks, "Remarks"),
];
