//! C1 — the order and its append-only alteration history.

use crate::price::Price;
use crate::types::{ExecutionStatus, OrderId, OrderType, Quantity, Timestamp};

/// A single material change to an order, per spec §3. The history is
/// append-only and ordered by `timestamp` non-decreasing; the last record
/// is the order's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlterationRecord {
    pub status: ExecutionStatus,
    pub timestamp: Timestamp,
    pub price: Price,
    pub quantity_remaining: Quantity,
}

/// Maximum number of [`AlterationRecord`]s retained per order before older
/// entries are coalesced (spec §5's "cap history length ... and coalesce
/// older entries"). See [`Order::push_record`] for how coalescing is done
/// without losing any `as_of` answer.
pub const DEFAULT_HISTORY_CAP: usize = 64;

/// C1. An order with identity and an append-only history of state
/// alterations; answers as-of queries.
///
/// `arrival_timestamp` is frozen at creation and is the only timestamp
/// price-time priority comparisons use (see `DESIGN.md`, Open Question 4 —
/// amendments bump the *history* record's timestamp so `as_of` queries see
/// them at the right instant, but never bump priority).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_type: OrderType,
    arrival_timestamp: Timestamp,
    history: Vec<AlterationRecord>,
    history_cap: usize,
}

impl Order {
    /// Initializes history with a single `NotExecuted` record.
    pub fn new(
        id: OrderId,
        order_type: OrderType,
        t: Timestamp,
        price: Price,
        qty: Quantity,
        history_cap: usize,
    ) -> Self {
        Order {
            id,
            order_type,
            arrival_timestamp: t,
            history: vec![AlterationRecord {
                status: ExecutionStatus::NotExecuted,
                timestamp: t,
                price,
                quantity_remaining: qty,
            }],
            // A cap of 1 would leave no room for the creation record once a
            // single mutation is appended: `push_record` would have to evict
            // the write it just made, corrupting every `as_of` answer from
            // that point on. 2 is the smallest cap `push_record` can honor
            // without ever evicting its own just-appended record.
            history_cap: history_cap.max(2),
        }
    }

    /// The timestamp used for price-time priority. Never changes after
    /// creation, even across amendments (spec §9, Open Question: amend
    /// timestamp).
    pub fn arrival_timestamp(&self) -> Timestamp {
        self.arrival_timestamp
    }

    /// The most recent alteration record — the order's current state.
    pub fn current(&self) -> &AlterationRecord {
        self.history.last().expect("history is never empty")
    }

    pub fn current_price(&self) -> Price {
        self.current().price
    }

    pub fn remaining_qty(&self) -> Quantity {
        self.current().quantity_remaining
    }

    pub fn current_status(&self) -> ExecutionStatus {
        self.current().status
    }

    /// Returns the history record in force at time `t` — the latest record
    /// whose timestamp is `<= t` — or `None` if `t` precedes creation.
    /// O(h) in the length of the retained history (P3).
    pub fn as_of(&self, t: Timestamp) -> Option<&AlterationRecord> {
        self.history.iter().rev().find(|r| r.timestamp <= t)
    }

    /// Whether the order was active (`NotExecuted` or `PartiallyExecuted`)
    /// at time `t`.
    pub fn is_active_at(&self, t: Timestamp) -> bool {
        self.as_of(t).is_some_and(|r| r.status.is_active())
    }

    /// Appends a record that preserves the current status and updates
    /// price/quantity. Priority is preserved: `arrival_timestamp` is
    /// untouched. The appended history record is stamped with `t` (the
    /// real command timestamp) so `as_of` queries see the amendment at the
    /// correct instant.
    pub fn amend(&mut self, t: Timestamp, new_price: Price, new_qty: Quantity) {
        let status = self.current_status();
        self.push_record(AlterationRecord {
            status,
            timestamp: t,
            price: new_price,
            quantity_remaining: new_qty,
        });
    }

    /// Appends a `PartiallyExecuted` or `Executed` record reflecting a
    /// fill. `Executed` iff `new_qty == 0`.
    pub fn partial_fill(&mut self, t: Timestamp, new_qty: Quantity) {
        let status = if new_qty == 0 {
            ExecutionStatus::Executed
        } else {
            ExecutionStatus::PartiallyExecuted
        };
        let price = self.current_price();
        self.push_record(AlterationRecord {
            status,
            timestamp: t,
            price,
            quantity_remaining: new_qty,
        });
    }

    /// Appends a terminal `Cancelled` record.
    pub fn cancel(&mut self, t: Timestamp) {
        let price = self.current_price();
        let qty = self.remaining_qty();
        self.push_record(AlterationRecord {
            status: ExecutionStatus::Cancelled,
            timestamp: t,
            price,
            quantity_remaining: qty,
        });
    }

    /// Appends `record`, coalescing into the last entry when it shares the
    /// same timestamp (there is no timestamp granularity finer than `t`
    /// within a single command, so two records at the same instant can
    /// never be told apart by an `as_of` query — keeping only the net
    /// final one at that instant is both correct and how the history stays
    /// bounded by `history_cap` under repeated same-tick amendments).
    fn push_record(&mut self, record: AlterationRecord) {
        if let Some(last) = self.history.last_mut() {
            if last.timestamp == record.timestamp {
                *last = record;
                return;
            }
        }
        self.history.push(record);
        // `history_cap` is always >= 2 (enforced in `Order::new`), so the
        // record just pushed (at `self.history.len() - 1`) is never the one
        // removed below — only an evicted record strictly older than it.
        if self.history.len() > self.history_cap {
            // Drop the oldest non-initial record; the creation record at
            // index 0 is kept so `as_of` for any t before the second
            // surviving record still resolves (it simply attributes the
            // intervening period to the creation state, which is the best
            // any bounded history can do without violating the cap).
            self.history.remove(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn as_of_before_creation_is_none() {
        let o = Order::new(OrderId(1), OrderType::Limit, 5, px("10.00"), 100, 64);
        assert!(o.as_of(4).is_none());
        assert!(o.as_of(5).is_some());
    }

    #[test]
    fn amend_preserves_arrival_timestamp_but_stamps_history() {
        let mut o = Order::new(OrderId(1), OrderType::Limit, 1, px("10.00"), 100, 64);
        o.amend(3, px("11.00"), 50);
        assert_eq!(o.arrival_timestamp(), 1);
        assert_eq!(o.as_of(2).unwrap().price, px("10.00"));
        assert_eq!(o.as_of(4).unwrap().price, px("11.00"));
        assert_eq!(o.as_of(4).unwrap().quantity_remaining, 50);
    }

    #[test]
    fn partial_fill_then_full_fill_transitions_status() {
        let mut o = Order::new(OrderId(1), OrderType::Limit, 1, px("10.00"), 100, 64);
        o.partial_fill(2, 40);
        assert_eq!(o.current_status(), ExecutionStatus::PartiallyExecuted);
        assert!(o.is_active_at(2));
        o.partial_fill(3, 0);
        assert_eq!(o.current_status(), ExecutionStatus::Executed);
        assert!(!o.is_active_at(3));
        assert!(o.is_active_at(2));
    }

    #[test]
    fn cancel_is_terminal() {
        let mut o = Order::new(OrderId(1), OrderType::Limit, 1, px("10.00"), 100, 64);
        o.cancel(2);
        assert_eq!(o.current_status(), ExecutionStatus::Cancelled);
        assert!(!o.is_active_at(2));
    }

    #[test]
    fn same_timestamp_writes_coalesce() {
        let mut o = Order::new(OrderId(1), OrderType::Limit, 1, px("10.00"), 100, 64);
        o.partial_fill(5, 60);
        o.partial_fill(5, 20);
        o.partial_fill(5, 0);
        assert_eq!(o.as_of(5).unwrap().quantity_remaining, 0);
        assert_eq!(o.as_of(4).unwrap().quantity_remaining, 100);
    }

    #[test]
    fn history_cap_bounds_growth() {
        let mut o = Order::new(OrderId(1), OrderType::Limit, 0, px("10.00"), 1000, 4);
        for t in 1..50u64 {
            o.amend(t, px("10.00"), 1000 - t);
        }
        assert!(o.as_of(0).is_some());
        assert_eq!(o.current().quantity_remaining, 1000 - 49);
    }

    #[test]
    fn history_cap_of_one_is_raised_to_two_and_a_cancel_still_sticks() {
        // A cap of 1 would force push_record to evict the write it just
        // made, silently discarding every mutation forever (P3 violation).
        let mut o = Order::new(OrderId(1), OrderType::Limit, 1, px("10.00"), 100, 1);
        o.cancel(2);
        assert_eq!(o.current_status(), ExecutionStatus::Cancelled);
        assert!(o.is_active_at(1));
        assert!(!o.is_active_at(2));
        assert!(!o.is_active_at(100));
    }
}
