//! Property tests for the engine-level invariants of spec §8 (P1, P5,
//! P6) that aren't already exercised as focused unit tests on the
//! narrower `SideBook`/`SymbolBook` types.

use limitbook::{Command, Engine, EngineConfig, OrderType, Price, Side, Symbol};
use proptest::prelude::*;

fn sym() -> Symbol {
    "AB".parse().unwrap()
}

fn px(cents: u64) -> Price {
    Price::from_cents(cents)
}

fn new_order(id: u64, t: u64, side: Side, price_cents: u64, qty: u64) -> Command {
    Command::New {
        order_id: id.into(),
        timestamp: t,
        symbol: sym(),
        order_type: OrderType::Limit,
        side,
        price: px(price_cents),
        quantity: qty,
    }
}

proptest! {
    /// P1: after any accepted command, `last_timestamp` equals the max
    /// timestamp seen so far, never more and never less.
    #[test]
    fn p1_last_timestamp_tracks_the_max_accepted(timestamps in prop::collection::vec(0u64..1000, 1..30)) {
        let mut engine = Engine::new(EngineConfig::default());
        let mut expected_max = 0u64;
        for (i, &t) in timestamps.iter().enumerate() {
            let before = engine.last_timestamp();
            let _ = engine.process(new_order(i as u64, t, Side::Buy, 1000, 1)).unwrap();
            if t >= before {
                expected_max = expected_max.max(t);
                prop_assert_eq!(engine.last_timestamp(), expected_max);
            } else {
                prop_assert_eq!(engine.last_timestamp(), expected_max);
            }
        }
    }

    /// P5: once a book is quiescent, a repeated match at the same
    /// timestamp produces no further trades.
    #[test]
    fn p5_match_is_idempotent_once_quiescent(qty in 1u64..500) {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_order(1, 1, Side::Buy, 1000, qty)).unwrap();
        engine.process(new_order(2, 2, Side::Sell, 1000, qty)).unwrap();
        let first = engine.process(Command::MatchAll { timestamp: 3 }).unwrap();
        prop_assert_eq!(first.len(), 1);
        let second = engine.process(Command::MatchAll { timestamp: 3 }).unwrap();
        prop_assert!(second.is_empty());
    }

    /// P6: a cancel followed by a match ignores the cancelled order.
    #[test]
    fn p6_cancel_then_match_ignores_cancelled_order(qty in 1u64..500) {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_order(1, 1, Side::Buy, 1000, qty)).unwrap();
        engine.process(Command::Cancel { order_id: 1u64.into(), timestamp: 2 }).unwrap();
        engine.process(new_order(2, 3, Side::Sell, 1000, qty)).unwrap();
        let trades = engine.process(Command::MatchAll { timestamp: 4 }).unwrap();
        prop_assert!(trades.is_empty());
    }

    /// P7: amending an order preserves its id and original arrival-time
    /// priority among same-priced orders; a price change reorders it.
    #[test]
    fn p7_amend_preserves_id_and_arrival_priority_at_same_price(qty in 1u64..500) {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_order(1, 1, Side::Buy, 1000, qty)).unwrap();
        engine.process(new_order(2, 2, Side::Buy, 1000, qty)).unwrap();
        engine
            .process(Command::Amend {
                order_id: 1u64.into(),
                timestamp: 3,
                symbol: sym(),
                order_type: OrderType::Limit,
                side: Side::Buy,
                price: px(1000),
                quantity: qty / 2 + 1,
            })
            .unwrap();
        let rows = engine.process(Command::QueryAll).unwrap();
        let first_id = match &rows[0] {
            limitbook::Event::SnapshotRow(row) => row.buy.unwrap().id,
            _ => panic!("expected snapshot row"),
        };
        prop_assert_eq!(first_id, 1u64.into());
    }

    /// P4: total filled quantity matches on both sides after running the
    /// match loop to quiescence.
    #[test]
    fn p4_fills_balance_between_buys_and_sells(buy_qty in 1u64..1000, sell_qty in 1u64..1000) {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_order(1, 1, Side::Buy, 1000, buy_qty)).unwrap();
        engine.process(new_order(2, 2, Side::Sell, 1000, sell_qty)).unwrap();
        let trades = engine.process(Command::MatchAll { timestamp: 3 }).unwrap();
        let filled: u64 = trades
            .iter()
            .map(|e| match e {
                limitbook::Event::Trade(t) => t.buy_qty_before.min(t.sell_qty_before),
                _ => 0,
            })
            .sum();
        prop_assert_eq!(filled, buy_qty.min(sell_qty));
    }
}
