//! C4 — `SymbolDirectory`: routes commands to the right book and
//! enumerates books in sorted symbol order for global queries.

use std::collections::{BTreeSet, HashMap};

use crate::orderbook::error::EngineError;
use crate::orderbook::symbol_book::SymbolBook;
use crate::types::{OrderId, Side, Symbol};

/// Maps symbol → `SymbolBook`, keeps the symbol set sorted for
/// deterministic global iteration (I5), and tracks which symbol and side
/// each admitted order id lives on (I6). The teacher's `manager.rs`
/// (`BookManagerStd`/`BookManagerTokio`) is the same idea — one directory
/// owning many books, keyed by symbol — minus the trade-routing channel,
/// which has no role in a single-threaded, synchronous engine.
pub struct SymbolDirectory {
    books: HashMap<Symbol, SymbolBook>,
    sorted_symbols: BTreeSet<Symbol>,
    order_location: HashMap<OrderId, (Symbol, Side)>,
    side_capacity: usize,
    history_cap: usize,
    max_symbols: usize,
}

impl SymbolDirectory {
    pub fn new(side_capacity: usize, history_cap: usize, max_symbols: usize) -> Self {
        SymbolDirectory {
            books: HashMap::new(),
            sorted_symbols: BTreeSet::new(),
            order_location: HashMap::new(),
            side_capacity,
            history_cap,
            max_symbols,
        }
    }

    /// Returns the book for `symbol`, creating it (and registering it in
    /// `sorted_symbols`) if absent. Rejects with
    /// [`EngineError::SymbolDirectoryCapacityExceeded`] if `symbol` is new
    /// and the directory is already at capacity (§7's other fatal
    /// condition: "Capacity overflow in a SideBook or in the symbol
    /// directory").
    pub fn get_or_create(&mut self, symbol: Symbol) -> Result<&mut SymbolBook, EngineError> {
        if !self.books.contains_key(&symbol) {
            if self.books.len() >= self.max_symbols {
                return Err(EngineError::SymbolDirectoryCapacityExceeded {
                    symbol,
                    capacity: self.max_symbols,
                });
            }
            self.sorted_symbols.insert(symbol);
            self.books
                .insert(symbol, SymbolBook::new(symbol, self.side_capacity, self.history_cap));
        }
        Ok(self.books.get_mut(&symbol).expect("just inserted or already present"))
    }

    pub fn lookup(&self, symbol: Symbol) -> Option<&SymbolBook> {
        self.books.get(&symbol)
    }

    pub fn lookup_mut(&mut self, symbol: Symbol) -> Option<&mut SymbolBook> {
        self.books.get_mut(&symbol)
    }

    /// The symbol a given order id was admitted under, if any (I6).
    pub fn symbol_of(&self, order_id: OrderId) -> Option<Symbol> {
        self.order_location.get(&order_id).map(|(s, _)| *s)
    }

    /// The side a given order id was admitted on, if any.
    pub fn side_of(&self, order_id: OrderId) -> Option<Side> {
        self.order_location.get(&order_id).map(|(_, side)| *side)
    }

    /// Records the symbol/side an accepted NEW order was admitted under.
    pub fn record(&mut self, order_id: OrderId, symbol: Symbol, side: Side) {
        self.order_location.insert(order_id, (symbol, side));
    }

    /// The lazy, restartable sequence of books in ascending symbol order
    /// (I5), used by global Query commands.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &SymbolBook> {
        self.sorted_symbols.iter().map(move |s| self.books.get(s).expect("sorted_symbols mirrors books' key set"))
    }

    /// Runs the match loop on every book in ascending symbol order,
    /// returning every trade produced, in that order (spec §5's ordering
    /// guarantee for global Match). A dedicated method rather than a
    /// mutable iterator: yielding `&mut SymbolBook` one symbol at a time
    /// from a `HashMap` while driving from a separately-ordered key set
    /// has no safe expression as a plain iterator, and the engine only
    /// ever needs "match everything, in order" as one unit of work.
    pub fn global_match(&mut self, t: crate::types::Timestamp) -> Vec<crate::event::TradeEvent> {
        let mut trades = Vec::new();
        for symbol in self.sorted_symbols.iter() {
            if let Some(book) = self.books.get_mut(symbol) {
                trades.extend(book.do_match(t));
            }
        }
        trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        s.parse().unwrap()
    }

    #[test]
    fn get_or_create_registers_symbol_once() {
        let mut dir = SymbolDirectory::new(16, 64, 64);
        dir.get_or_create(sym("AB")).unwrap();
        dir.get_or_create(sym("AB")).unwrap();
        assert_eq!(dir.iter_sorted().count(), 1);
    }

    #[test]
    fn iter_sorted_is_ascending_lexicographic() {
        let mut dir = SymbolDirectory::new(16, 64, 64);
        dir.get_or_create(sym("ALN")).unwrap();
        dir.get_or_create(sym("ALB")).unwrap();
        let names: Vec<String> = dir.iter_sorted().map(|b| b.symbol().to_string()).collect();
        assert_eq!(names, vec!["ALB".to_string(), "ALN".to_string()]);
    }

    #[test]
    fn symbol_of_and_side_of_track_recorded_orders() {
        let mut dir = SymbolDirectory::new(16, 64, 64);
        dir.record(OrderId(1), sym("AB"), Side::Buy);
        assert_eq!(dir.symbol_of(OrderId(1)), Some(sym("AB")));
        assert_eq!(dir.side_of(OrderId(1)), Some(Side::Buy));
        assert_eq!(dir.symbol_of(OrderId(2)), None);
    }

    #[test]
    fn get_or_create_rejects_new_symbol_once_at_capacity() {
        let mut dir = SymbolDirectory::new(16, 64, 1);
        dir.get_or_create(sym("AB")).unwrap();
        // Re-fetching the same symbol never counts against capacity.
        dir.get_or_create(sym("AB")).unwrap();
        let err = dir.get_or_create(sym("CD")).unwrap_err();
        assert!(matches!(err, EngineError::SymbolDirectoryCapacityExceeded { capacity: 1, .. }));
    }
}
