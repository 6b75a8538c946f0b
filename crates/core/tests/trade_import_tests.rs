//! End-to-end tests: statement text to per-symbol summaries.

use rust_decimal_macros::dec;
use tradebook_core::errors::CsvError;
use tradebook_core::trades::{HeaderLabels, TradeSchema};
use tradebook_core::{
    aggregate_trades, parse_csv_string, parse_trades, Error, PlainSchema, SummaryOrder,
    TradeAction, TradeField,
};

fn labels() -> HeaderLabels {
    HeaderLabels::new([
        (TradeField::Date, "Date"),
        (TradeField::Symbol, "Symbol"),
        (TradeField::Action, "Action"),
        (TradeField::Quantity, "Quantity"),
    ])
    .unwrap()
}

#[test]
fn buy_and_sell_net_into_one_summary() {
    let labels = labels();
    let content = "Date,Symbol,Action,Quantity\n05-Jan-23,ABC,BUY,\"1,000\"\n06-Jan-23,ABC,SELL,400\n";

    let trades = parse_trades(content, &TradeSchema::new(&labels)).unwrap();
    assert_eq!(trades.len(), 2);

    let summaries = aggregate_trades(&trades, SummaryOrder::FirstSeen);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].symbol, "ABC");
    assert_eq!(summaries[0].quantity, dec!(600));
    assert_eq!(summaries[0].constituents[0].action, TradeAction::Buy);
    assert_eq!(summaries[0].constituents[0].date_label(), "2023/01/05");
}

#[test]
fn spaced_quoted_quantity_keeps_thousands() {
    let labels = labels();
    let content = "Date,Symbol,Action,Quantity\n05-Jan-23, ABC, BUY, \"1,000\"";

    let trades = parse_trades(content, &TradeSchema::new(&labels)).unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].symbol, "ABC");
    assert_eq!(trades[0].quantity, dec!(1000));
}

#[test]
fn cancelled_trades_stay_in_records_only() {
    let labels = labels();
    let content = "Date,Symbol,Action,Quantity\r\n05-Jan-23,ABC,BUY,250\r\n06-Jan-23,ABC,SELL,250\r\n";

    let trades = parse_trades(content, &TradeSchema::new(&labels)).unwrap();
    assert_eq!(trades.len(), 2);
    assert!(aggregate_trades(&trades, SummaryOrder::FirstSeen).is_empty());
}

#[test]
fn header_only_file_is_empty() {
    let labels = labels();
    let err = parse_trades("Date,Symbol,Action,Quantity", &TradeSchema::new(&labels)).unwrap_err();
    assert!(matches!(err, Error::Csv(CsvError::Empty)));
}

#[test]
fn plain_schema_returns_flat_rows() {
    let rows = parse_csv_string("Symbol,Note\nABC,\"x, y\",ignored", &PlainSchema).unwrap();
    let json = serde_json::to_value(&rows).unwrap();
    assert_eq!(json, serde_json::json!([{ "Symbol": "ABC", "Note": "x, y" }]));
}

#[test]
fn summaries_serialize_for_the_ui() {
    let labels = labels();
    let content = "Date,Symbol,Action,Quantity\n05-Jan-23,ABC,BUY,10";
    let trades = parse_trades(content, &TradeSchema::new(&labels)).unwrap();
    let summaries = aggregate_trades(&trades, SummaryOrder::FirstSeen);

    let json = serde_json::to_value(&summaries).unwrap();
    assert_eq!(json[0]["symbol"], "ABC");
    assert_eq!(json[0]["constituents"][0]["date"], "2023/01/05");
    assert_eq!(json[0]["constituents"][0]["action"], "BUY");
}
