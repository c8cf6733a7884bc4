//! C5 — `Engine`: dispatches a `Command` to the right operation, enforces
//! the monotonic-timestamp invariant (I1), and produces the outcome
//! events.

use tracing::{debug, error, warn};

use crate::command::Command;
use crate::event::Event;
use crate::orderbook::directory::SymbolDirectory;
use crate::orderbook::error::{EngineError, RejectError};
use crate::types::{OrderId, Side, Symbol, Timestamp};

/// Construction-time configuration, mirroring the teacher's constructor
/// fields on `OrderBook` (`tick_size`, `lot_size`, ...). See `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Max active orders per `SideBook` (spec §4.2's suggested 2¹⁶).
    pub side_capacity: usize,
    /// Max retained `AlterationRecord`s per order (spec §5's suggested 64).
    /// Must be at least 2: `Order::push_record` needs room for the creation
    /// record plus the most recent alteration without evicting the write it
    /// just made.
    pub history_cap: usize,
    /// Max distinct symbols the `SymbolDirectory` will register (§7's other
    /// fatal capacity: "... or in the symbol directory").
    pub max_symbols: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            side_capacity: 65_536,
            history_cap: 64,
            max_symbols: 65_536,
        }
    }
}

/// The single-threaded command dispatcher (§5: "cooperative, entirely
/// synchronous. ... One command in → zero or more events out → next
/// command.").
pub struct Engine {
    directory: SymbolDirectory,
    last_timestamp: Timestamp,
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            directory: SymbolDirectory::new(config.side_capacity, config.history_cap, config.max_symbols),
            last_timestamp: 0,
            config,
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// The engine's logical clock (I1: non-decreasing across the command
    /// stream).
    pub fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
    }

    pub fn directory(&self) -> &SymbolDirectory {
        &self.directory
    }

    /// Processes one command, returning every event it produced in
    /// deterministic order (§5). Only a fatal capacity overflow (§7)
    /// returns `Err`; every recoverable rejection is rendered as an
    /// `Event` and returned inside `Ok` — "no error ever leaves the Engine
    /// boundary unrendered" (§7).
    pub fn process(&mut self, command: Command) -> Result<Vec<Event>, EngineError> {
        match command {
            Command::New {
                order_id,
                timestamp,
                symbol,
                order_type,
                side,
                price,
                quantity,
            } => self.process_new(order_id, timestamp, symbol, order_type, side, price, quantity),
            Command::Amend {
                order_id,
                timestamp,
                symbol,
                side,
                price,
                quantity,
                ..
            } => Ok(self.process_amend(order_id, timestamp, symbol, side, price, quantity)),
            Command::Cancel { order_id, timestamp } => Ok(self.process_cancel(order_id, timestamp)),
            Command::MatchAll { timestamp } => Ok(self.process_match_all(timestamp)),
            Command::MatchSymbol { timestamp, symbol } => Ok(self.process_match_symbol(timestamp, symbol)),
            Command::QueryAll => Ok(self.process_query_all()),
            Command::QuerySymbol { symbol } => Ok(self.process_query_symbol(symbol)),
            Command::QueryAsOf { timestamp } => Ok(self.process_query_as_of(timestamp)),
            Command::QuerySymbolAsOf { timestamp, symbol } => {
                Ok(self.process_query_symbol_as_of(timestamp, symbol))
            }
        }
    }

    /// Enforces I1: a command whose timestamp regressed is rejected
    /// without side effects (the clock does not move and no book is
    /// touched). Otherwise advances the clock and returns `true` — note
    /// this happens even when the dispatch that follows turns out to
    /// reject the command for a business reason (unknown order/symbol):
    /// the clock tracks the input stream's ordering, not whether each
    /// command ultimately succeeded.
    fn admit_timestamp(&mut self, t: Timestamp) -> bool {
        if t < self.last_timestamp {
            false
        } else {
            self.last_timestamp = t;
            true
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn process_new(
        &mut self,
        order_id: OrderId,
        timestamp: Timestamp,
        symbol: Symbol,
        order_type: crate::types::OrderType,
        side: Side,
        price: crate::price::Price,
        quantity: crate::types::Quantity,
    ) -> Result<Vec<Event>, EngineError> {
        if !self.admit_timestamp(timestamp) {
            warn!(%order_id, timestamp, "rejecting new order: timestamp regressed");
            let err = RejectError::timestamp_out_of_order();
            return Ok(vec![Event::Reject {
                id: order_id,
                code: err.code(),
                message: err.message().to_string(),
            }]);
        }
        debug!(%order_id, %symbol, %side, %price, quantity, "new order");
        let book = match self.directory.get_or_create(symbol) {
            Ok(book) => book,
            Err(err) => {
                error!(%order_id, %symbol, %err, "fatal: symbol directory capacity exceeded");
                return Err(err);
            }
        };
        match book.add(order_id, order_type, side, timestamp, price, quantity) {
            Ok(()) => {
                self.directory.record(order_id, symbol, side);
                Ok(vec![Event::Accept { id: order_id }])
            }
            Err(err) => {
                error!(%order_id, %err, "fatal: side book capacity exceeded");
                Err(err)
            }
        }
    }

    fn process_amend(
        &mut self,
        order_id: OrderId,
        timestamp: Timestamp,
        symbol: Symbol,
        side: Side,
        price: crate::price::Price,
        quantity: crate::types::Quantity,
    ) -> Vec<Event> {
        if !self.admit_timestamp(timestamp) {
            warn!(%order_id, timestamp, "rejecting amend: timestamp regressed");
            let err = RejectError::timestamp_out_of_order();
            return vec![Event::AmendReject {
                id: order_id,
                code: err.code(),
                message: err.message().to_string(),
            }];
        }
        let accepted = match self.directory.lookup_mut(symbol) {
            Some(book) => book.amend(side, order_id, timestamp, price, quantity),
            None => false,
        };
        if accepted {
            debug!(%order_id, %symbol, "amend accepted");
            vec![Event::AmendAccept { id: order_id }]
        } else {
            let err = RejectError::order_does_not_exist();
            vec![Event::AmendReject {
                id: order_id,
                code: err.code(),
                message: err.message().to_string(),
            }]
        }
    }

    fn process_cancel(&mut self, order_id: OrderId, timestamp: Timestamp) -> Vec<Event> {
        if !self.admit_timestamp(timestamp) {
            warn!(%order_id, timestamp, "rejecting cancel: timestamp regressed");
            let err = RejectError::timestamp_out_of_order();
            return vec![Event::CancelReject {
                id: order_id,
                code: err.code(),
                message: err.message().to_string(),
            }];
        }
        let accepted = (|| {
            let symbol = self.directory.symbol_of(order_id)?;
            let side = self.directory.side_of(order_id)?;
            let book = self.directory.lookup_mut(symbol)?;
            Some(book.cancel(side, order_id, timestamp))
        })()
        .unwrap_or(false);
        if accepted {
            debug!(%order_id, "cancel accepted");
            vec![Event::CancelAccept { id: order_id }]
        } else {
            let err = RejectError::order_does_not_exist();
            vec![Event::CancelReject {
                id: order_id,
                code: err.code(),
                message: err.message().to_string(),
            }]
        }
    }

    fn process_match_all(&mut self, timestamp: Timestamp) -> Vec<Event> {
        if !self.admit_timestamp(timestamp) {
            warn!(timestamp, "rejecting global match: timestamp regressed");
            return Vec::new();
        }
        self.directory
            .global_match(timestamp)
            .into_iter()
            .map(Event::Trade)
            .collect()
    }

    fn process_match_symbol(&mut self, timestamp: Timestamp, symbol: Symbol) -> Vec<Event> {
        if !self.admit_timestamp(timestamp) {
            warn!(%symbol, timestamp, "rejecting symbol match: timestamp regressed");
            return Vec::new();
        }
        match self.directory.lookup_mut(symbol) {
            Some(book) => book.do_match(timestamp).into_iter().map(Event::Trade).collect(),
            None => Vec::new(),
        }
    }

    fn process_query_all(&self) -> Vec<Event> {
        let t = self.last_timestamp;
        self.directory
            .iter_sorted()
            .flat_map(|book| book.snapshot(t))
            .map(Event::SnapshotRow)
            .collect()
    }

    fn process_query_symbol(&self, symbol: Symbol) -> Vec<Event> {
        let t = self.last_timestamp;
        match self.directory.lookup(symbol) {
            Some(book) => book.snapshot(t).into_iter().map(Event::SnapshotRow).collect(),
            None => Vec::new(),
        }
    }

    fn process_query_as_of(&self, timestamp: Timestamp) -> Vec<Event> {
        self.directory
            .iter_sorted()
            .flat_map(|book| book.snapshot(timestamp))
            .map(Event::SnapshotRow)
            .collect()
    }

    fn process_query_symbol_as_of(&self, timestamp: Timestamp, symbol: Symbol) -> Vec<Event> {
        match self.directory.lookup(symbol) {
            Some(book) => book.snapshot(timestamp).into_iter().map(Event::SnapshotRow).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderType;

    fn sym(s: &str) -> Symbol {
        s.parse().unwrap()
    }

    fn px(s: &str) -> crate::price::Price {
        s.parse().unwrap()
    }

    fn new_cmd(id: u64, t: Timestamp, symbol: &str, side: Side, price: &str, qty: u64) -> Command {
        Command::New {
            order_id: OrderId(id),
            timestamp: t,
            symbol: sym(symbol),
            order_type: OrderType::Limit,
            side,
            price: px(price),
            quantity: qty,
        }
    }

    #[test]
    fn monotonic_rejection_leaves_clock_and_book_untouched() {
        let mut engine = Engine::new(EngineConfig::default());
        let events = engine.process(new_cmd(1, 5, "AB", Side::Buy, "10.00", 1)).unwrap();
        assert_eq!(events[0], Event::Accept { id: OrderId(1) });
        let events = engine.process(new_cmd(2, 3, "AB", Side::Sell, "9.00", 1)).unwrap();
        assert_eq!(
            events[0],
            Event::Reject {
                id: OrderId(2),
                code: 303,
                message: "timestamp out of order".to_string(),
            }
        );
        assert_eq!(engine.last_timestamp(), 5);
    }

    #[test]
    fn cancel_unknown_order_emits_404() {
        let mut engine = Engine::new(EngineConfig::default());
        let events = engine.process(Command::Cancel { order_id: OrderId(999), timestamp: 10 }).unwrap();
        assert_eq!(events[0].to_string(), "999 - CancelReject - 404 - Order does not exist");
    }

    #[test]
    fn global_query_orders_symbols_ascending() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_cmd(1, 1, "ALN", Side::Buy, "10.00", 10)).unwrap();
        engine.process(new_cmd(2, 2, "ALB", Side::Buy, "10.00", 10)).unwrap();
        let events = engine.process(Command::QueryAll).unwrap();
        let rows: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        assert!(rows[0].starts_with("ALB|"));
        assert!(rows[1].starts_with("ALN|"));
    }

    #[test]
    fn as_of_query_is_not_gated_by_the_clock() {
        let mut engine = Engine::new(EngineConfig::default());
        engine.process(new_cmd(1, 1, "SYM", Side::Buy, "10.00", 100)).unwrap();
        engine
            .process(Command::Amend {
                order_id: OrderId(1),
                timestamp: 3,
                symbol: sym("SYM"),
                order_type: OrderType::Limit,
                side: Side::Buy,
                price: px("11.00"),
                quantity: 50,
            })
            .unwrap();
        let before = engine.process(Command::QuerySymbolAsOf { timestamp: 2, symbol: sym("SYM") }).unwrap();
        assert_eq!(before[0].to_string(), "SYM|1,L,100,10.00|");
        let after = engine.process(Command::QuerySymbolAsOf { timestamp: 4, symbol: sym("SYM") }).unwrap();
        assert_eq!(after[0].to_string(), "SYM|1,L,50,11.00|");
    }

    #[test]
    fn match_on_unknown_symbol_is_a_silent_no_op() {
        let mut engine = Engine::new(EngineConfig::default());
        let events = engine.process(Command::MatchSymbol { timestamp: 1, symbol: sym("ZZ") }).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn fatal_side_book_capacity_overflow_propagates_as_err() {
        let mut engine = Engine::new(EngineConfig { side_capacity: 1, history_cap: 64, max_symbols: 64 });
        engine.process(new_cmd(1, 1, "AB", Side::Buy, "10.00", 1)).unwrap();
        let result = engine.process(new_cmd(2, 2, "AB", Side::Buy, "10.00", 1));
        assert!(matches!(result, Err(EngineError::SideBookCapacityExceeded { .. })));
    }

    #[test]
    fn fatal_symbol_directory_capacity_overflow_propagates_as_err() {
        let mut engine = Engine::new(EngineConfig { side_capacity: 16, history_cap: 64, max_symbols: 1 });
        engine.process(new_cmd(1, 1, "AB", Side::Buy, "10.00", 1)).unwrap();
        // Same symbol again never counts against the directory's capacity.
        engine.process(new_cmd(2, 2, "AB", Side::Sell, "10.00", 1)).unwrap();
        let result = engine.process(new_cmd(3, 3, "CD", Side::Buy, "10.00", 1));
        assert!(matches!(result, Err(EngineError::SymbolDirectoryCapacityExceeded { .. })));
    }
}
