//! Top-5 snapshot assembly (spec §4.3).
//!
//! Pure function over two already-ranked top-N slices, kept separate from
//! [`crate::orderbook::symbol_book`] the way the teacher keeps
//! `snapshot.rs` separate from `book.rs` — the assembly rule (pad the
//! shorter side with `None`, one row per rank) has nothing to do with how
//! the ranked slices were produced.

use crate::event::{SnapshotBuyField, SnapshotRow, SnapshotSellField};
use crate::orderbook::order::Order;
use crate::types::{OrderId, Symbol, Timestamp};

/// Builds up to five [`SnapshotRow`]s from the top-N buy and sell orders
/// active at `t`. The number of rows is `max(buys.len(), sells.len())`,
/// capped at five.
pub fn assemble(symbol: Symbol, t: Timestamp, buys: &[&Order], sells: &[&Order]) -> Vec<SnapshotRow> {
    let rows = buys.len().max(sells.len()).min(5);
    (0..rows)
        .map(|i| SnapshotRow {
            symbol,
            buy: buys.get(i).map(|o| buy_field(o, t)),
            sell: sells.get(i).map(|o| sell_field(o, t)),
        })
        .collect()
}

fn buy_field(order: &Order, t: Timestamp) -> SnapshotBuyField {
    let record = order.as_of(t).expect("caller filters to orders active at t");
    SnapshotBuyField {
        id: order.id,
        order_type: order.order_type,
        qty: record.quantity_remaining,
        price: record.price,
    }
}

fn sell_field(order: &Order, t: Timestamp) -> SnapshotSellField {
    let record = order.as_of(t).expect("caller filters to orders active at t");
    SnapshotSellField {
        price: record.price,
        qty: record.quantity_remaining,
        order_type: order.order_type,
        id: order.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderType;

    fn sym() -> Symbol {
        "AB".parse().unwrap()
    }

    #[test]
    fn row_count_is_max_of_both_sides() {
        let a = Order::new(OrderId(1), OrderType::Limit, 1, "1.00".parse().unwrap(), 10, 64);
        let b = Order::new(OrderId(2), OrderType::Limit, 1, "1.00".parse().unwrap(), 10, 64);
        let c = Order::new(OrderId(3), OrderType::Limit, 1, "1.00".parse().unwrap(), 10, 64);
        let buys = vec![&a, &b, &c];
        let sells: Vec<&Order> = vec![&a];
        let rows = assemble(sym(), 1, &buys, &sells);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].sell.is_some());
        assert!(rows[1].sell.is_none());
    }

    #[test]
    fn caps_at_five_rows() {
        let orders: Vec<Order> = (0..7)
            .map(|i| Order::new(OrderId(i), OrderType::Limit, 1, "1.00".parse().unwrap(), 10, 64))
            .collect();
        let refs: Vec<&Order> = orders.iter().collect();
        let rows = assemble(sym(), 1, &refs, &[]);
        assert_eq!(rows.len(), 5);
    }
}
