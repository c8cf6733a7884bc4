//! `Event` — the report writer's input contract (spec §6).
//!
//! The report writer itself is an external collaborator, out of scope for
//! the matching core; this module defines the exact structured events it
//! consumes and the exact line it must render for each, so any conforming
//! writer (see [`crate::report`] for one) produces byte-identical output.

use std::fmt;

use crate::price::Price;
use crate::types::{OrderId, OrderType, Quantity, Symbol};

/// One trade produced by a symbol book's match loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TradeEvent {
    pub symbol: Symbol,
    pub buy_id: OrderId,
    pub buy_type: OrderType,
    pub buy_qty_before: Quantity,
    pub buy_price: Price,
    pub sell_price: Price,
    pub sell_qty_before: Quantity,
    pub sell_type: OrderType,
    pub sell_id: OrderId,
}

impl fmt::Display for TradeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{},{},{},{}|{},{},{},{}",
            self.symbol,
            self.buy_id,
            self.buy_type,
            self.buy_qty_before,
            self.buy_price,
            self.sell_price,
            self.sell_qty_before,
            self.sell_type,
            self.sell_id
        )
    }
}

/// The buy-side sub-record of a [`SnapshotRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotBuyField {
    pub id: OrderId,
    pub order_type: OrderType,
    pub qty: Quantity,
    pub price: Price,
}

impl fmt::Display for SnapshotBuyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.id, self.order_type, self.qty, self.price)
    }
}

/// The sell-side sub-record of a [`SnapshotRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotSellField {
    pub price: Price,
    pub qty: Quantity,
    pub order_type: OrderType,
    pub id: OrderId,
}

impl fmt::Display for SnapshotSellField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.price, self.qty, self.order_type, self.id)
    }
}

/// One rank of a top-5 snapshot. Either side may be absent when that side
/// has fewer than `rank + 1` active orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SnapshotRow {
    pub symbol: Symbol,
    pub buy: Option<SnapshotBuyField>,
    pub sell: Option<SnapshotSellField>,
}

impl fmt::Display for SnapshotRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buy = self.buy.map(|b| b.to_string()).unwrap_or_default();
        let sell = self.sell.map(|s| s.to_string()).unwrap_or_default();
        write!(f, "{}|{}|{}", self.symbol, buy, sell)
    }
}

/// Every structured event the engine can produce for one command (§6).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Event {
    Accept { id: OrderId },
    Reject { id: OrderId, code: u16, message: String },
    AmendAccept { id: OrderId },
    AmendReject { id: OrderId, code: u16, message: String },
    CancelAccept { id: OrderId },
    CancelReject { id: OrderId, code: u16, message: String },
    Trade(TradeEvent),
    SnapshotRow(SnapshotRow),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Accept { id } => write!(f, "{id} - Accept"),
            Event::Reject { id, code, message } => write!(f, "{id} - Reject - {code} - {message}"),
            Event::AmendAccept { id } => write!(f, "{id} - AmmendAccept"),
            Event::AmendReject { id, code, message } => {
                write!(f, "{id} - AmmendReject - {code} - {message}")
            }
            Event::CancelAccept { id } => write!(f, "{id} - CancelAccept"),
            Event::CancelReject { id, code, message } => {
                write!(f, "{id} - CancelReject - {code} - {message}")
            }
            Event::Trade(trade) => write!(f, "{trade}"),
            Event::SnapshotRow(row) => write!(f, "{row}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderType;

    fn sym() -> Symbol {
        "AB".parse().unwrap()
    }

    fn px(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn accept_renders_exactly() {
        let e = Event::Accept { id: OrderId(1) };
        assert_eq!(e.to_string(), "1 - Accept");
    }

    #[test]
    fn amend_accept_uses_the_spec_literal_typo() {
        let e = Event::AmendAccept { id: OrderId(7) };
        assert_eq!(e.to_string(), "7 - AmmendAccept");
    }

    #[test]
    fn cancel_reject_renders_code_and_message() {
        let e = Event::CancelReject {
            id: OrderId(999),
            code: 404,
            message: "Order does not exist".to_string(),
        };
        assert_eq!(e.to_string(), "999 - CancelReject - 404 - Order does not exist");
    }

    #[test]
    fn trade_renders_per_spec_scenario_2() {
        let t = TradeEvent {
            symbol: sym(),
            buy_id: OrderId(1),
            buy_type: OrderType::Limit,
            buy_qty_before: 100,
            buy_price: px("104.53"),
            sell_price: px("104.42"),
            sell_qty_before: 100,
            sell_type: OrderType::Limit,
            sell_id: OrderId(2),
        };
        assert_eq!(t.to_string(), "AB|1,L,100,104.53|104.42,100,L,2");
    }

    #[test]
    fn snapshot_row_with_empty_sell_side() {
        let row = SnapshotRow {
            symbol: sym(),
            buy: Some(SnapshotBuyField {
                id: OrderId(1),
                order_type: OrderType::Limit,
                qty: 100,
                price: px("104.53"),
            }),
            sell: None,
        };
        assert_eq!(row.to_string(), "AB|1,L,100,104.53|");
    }
}
