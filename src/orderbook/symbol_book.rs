//! C3 — `SymbolBook`, one symbol's paired buy/sell `SideBook`s, and the
//! match loop.

use tracing::trace;

use crate::event::TradeEvent;
use crate::orderbook::error::EngineError;
use crate::orderbook::order::Order;
use crate::orderbook::side_book::SideBook;
use crate::orderbook::snapshot;
use crate::price::Price;
use crate::types::{OrderId, OrderType, Quantity, Side, Symbol, Timestamp};

/// Number of ranks a [`SymbolBook::snapshot`] reports (spec §4.3).
pub const SNAPSHOT_DEPTH: usize = 5;

/// Pairs a buy [`SideBook`] and a sell [`SideBook`] for one symbol.
pub struct SymbolBook {
    symbol: Symbol,
    buys: SideBook,
    sells: SideBook,
}

impl SymbolBook {
    pub fn new(symbol: Symbol, capacity: usize, history_cap: usize) -> Self {
        SymbolBook {
            symbol,
            buys: SideBook::new(Side::Buy, capacity, history_cap),
            sells: SideBook::new(Side::Sell, capacity, history_cap),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    fn side_book(&self, side: Side) -> &SideBook {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    fn side_book_mut(&mut self, side: Side) -> &mut SideBook {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// Routes a new order to the correct side book.
    pub fn add(
        &mut self,
        id: OrderId,
        order_type: OrderType,
        side: Side,
        t: Timestamp,
        price: Price,
        qty: Quantity,
    ) -> Result<(), EngineError> {
        self.side_book_mut(side).insert(id, order_type, t, price, qty)
    }

    /// Amends an order on the given side. Returns `false` if not found
    /// there (the engine turns that into `OrderDoesNotExist`).
    pub fn amend(&mut self, side: Side, id: OrderId, t: Timestamp, price: Price, qty: Quantity) -> bool {
        self.side_book_mut(side).amend(id, t, price, qty)
    }

    /// Cancels an order, trying the side it is recorded under. The
    /// directory already knows the side an order was admitted on (spec
    /// §4.4's `order_to_symbol`, extended here to also carry the side — see
    /// `DESIGN.md`), so callers pass it in directly rather than this
    /// method guessing across both sides.
    pub fn cancel(&mut self, side: Side, id: OrderId, t: Timestamp) -> bool {
        self.side_book_mut(side).cancel_by_id(id, t)
    }

    /// The matching loop (spec §4.3). Repeatedly pairs the best buy
    /// against the best sell until no cross remains, returning every
    /// [`TradeEvent`] produced, in crossing order.
    pub fn do_match(&mut self, t: Timestamp) -> Vec<TradeEvent> {
        let mut trades = Vec::new();
        loop {
            let Some((buy_id, sell_id, trade_qty, buy_price, sell_price, buy_before, sell_before, buy_type, sell_type)) =
                self.next_cross()
            else {
                break;
            };
            trace!(symbol = %self.symbol, %buy_id, %sell_id, qty = trade_qty, price = %buy_price, "trade");
            trades.push(TradeEvent {
                symbol: self.symbol,
                buy_id,
                buy_type,
                buy_qty_before: buy_before,
                buy_price,
                sell_price,
                sell_qty_before: sell_before,
                sell_type,
                sell_id,
            });
            self.buys.apply_fill(buy_id, trade_qty, t);
            self.sells.apply_fill(sell_id, trade_qty, t);
        }
        trades
    }

    /// Inspects (without mutating) whether the current top-of-book crosses,
    /// and if so, everything the match loop needs to record a trade.
    #[allow(clippy::type_complexity)]
    fn next_cross(
        &self,
    ) -> Option<(
        OrderId,
        OrderId,
        Quantity,
        Price,
        Price,
        Quantity,
        Quantity,
        OrderType,
        OrderType,
    )> {
        let b = self.buys.top()?;
        let s = self.sells.top()?;
        if b.current_price().cents() < s.current_price().cents() {
            return None;
        }
        let trade_qty = b.remaining_qty().min(s.remaining_qty());
        Some((
            b.id,
            s.id,
            trade_qty,
            // Trade price discovery: the buy's price (spec §4.3 step 2,
            // resolved literally rather than via price improvement — see
            // DESIGN.md Open Question 2).
            b.current_price(),
            s.current_price(),
            b.remaining_qty(),
            s.remaining_qty(),
            b.order_type,
            s.order_type,
        ))
    }

    /// The top-5 snapshot at time `t` (spec §4.3).
    pub fn snapshot(&self, t: Timestamp) -> Vec<crate::event::SnapshotRow> {
        let buys = self.buys.top_n_as_of(t, SNAPSHOT_DEPTH);
        let sells = self.sells.top_n_as_of(t, SNAPSHOT_DEPTH);
        snapshot::assemble(self.symbol, t, &buys, &sells)
    }

    /// Looks up a single order (active or retained) by id and side.
    pub fn order(&self, side: Side, id: OrderId) -> Option<&Order> {
        self.side_book(side).get(id)
    }
}
