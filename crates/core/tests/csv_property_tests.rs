//! Property-based integration tests for tokenizing and aggregation.
//!
//! These tests verify that universal properties hold across generated
//! statements, using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tradebook_core::parser::tokenize;
use tradebook_core::{aggregate_trades, SummaryOrder, TradeAction, TradeRecord};

// =============================================================================
// Generators
// =============================================================================

/// Generates a cell that may contain commas but never quotes or line breaks.
fn arb_cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 ,.]{0,10}"
}

fn arb_action() -> impl Strategy<Value = TradeAction> {
    prop_oneof![Just(TradeAction::Buy), Just(TradeAction::Sell)]
}

/// Generates a trade on one of a handful of symbols so groups collide.
fn arb_trade() -> impl Strategy<Value = TradeRecord> {
    (
        prop_oneof![Just("ABC"), Just("XYZ"), Just("LMN"), Just("QRS")],
        arb_action(),
        1u32..1000,
    )
        .prop_map(|(symbol, action, quantity)| TradeRecord {
            date: None,
            symbol: symbol.to_string(),
            name: String::new(),
            client: String::new(),
            action,
            quantity: Decimal::from(quantity),
            price: Decimal::ZERO,
            remarks: String::new(),
        })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Quoted cells come back whole, commas included, whatever whitespace
    /// surrounds the quotes.
    #[test]
    fn quoted_cells_survive_tokenizing(
        cells in prop::collection::vec(arb_cell(), 2..6),
        separator in prop_oneof![Just(","), Just(", "), Just(" ,  ")],
    ) {
        let line = cells
            .iter()
            .map(|cell| format!("\"{}\"", cell))
            .collect::<Vec<_>>()
            .join(separator);

        let rows = tokenize(&line).unwrap();
        let expected: Vec<String> = cells.iter().map(|c| c.trim().to_string()).collect();

        prop_assert_eq!(rows.len(), 1);
        prop_assert_eq!(&rows[0], &expected);
    }

    /// Each line is one row, even when every line carries quoted commas.
    #[test]
    fn quoted_lines_stay_separate(lines in prop::collection::vec(prop::collection::vec(arb_cell(), 1..4), 1..6)) {
        let content = lines
            .iter()
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| format!(" \"{}\"", cell))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\r\n");

        let rows = tokenize(&content).unwrap();

        prop_assert_eq!(rows.len(), lines.len());
        for (row, cells) in rows.iter().zip(&lines) {
            let expected: Vec<String> = cells.iter().map(|c| c.trim().to_string()).collect();
            prop_assert_eq!(row, &expected);
        }
    }

    /// A trailing comma always adds exactly one empty cell.
    #[test]
    fn trailing_comma_adds_empty_cell(cells in prop::collection::vec("[A-Za-z0-9]{1,8}", 1..6)) {
        let line = format!("{},", cells.join(","));
        let rows = tokenize(&line).unwrap();

        prop_assert_eq!(rows[0].len(), cells.len() + 1);
        prop_assert_eq!(rows[0].last().map(String::as_str), Some(""));
    }

    /// Every summary nets buys against sells and none of them is zero.
    #[test]
    fn summaries_net_buys_against_sells(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let summaries = aggregate_trades(&trades, SummaryOrder::FirstSeen);

        for summary in &summaries {
            let expected: Decimal = trades
                .iter()
                .filter(|t| t.symbol == summary.symbol)
                .map(|t| t.signed_quantity())
                .sum();
            prop_assert_eq!(summary.quantity, expected);
            prop_assert!(!summary.quantity.is_zero());
            prop_assert!(summary.constituents.iter().all(|t| t.symbol == summary.symbol));
        }

        let symbols: HashSet<&str> = summaries.iter().map(|s| s.symbol.as_str()).collect();
        prop_assert_eq!(symbols.len(), summaries.len());
    }

    /// Sorting by net quantity only reorders the first-seen summaries.
    #[test]
    fn ordering_is_a_permutation(trades in prop::collection::vec(arb_trade(), 0..40)) {
        let first_seen = aggregate_trades(&trades, SummaryOrder::FirstSeen);
        let sorted = aggregate_trades(&trades, SummaryOrder::NetQuantityDesc);

        prop_assert_eq!(first_seen.len(), sorted.len());
        prop_assert!(sorted.windows(2).all(|pair| pair[0].quantity >= pair[1].quantity));
        for summary in &sorted {
            prop_assert!(first_seen.contains(summary));
        }
    }
}
