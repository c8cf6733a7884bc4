//! `Command` — the parser's output contract (spec §1, §6).
//!
//! The textual command parser is an external collaborator, out of scope
//! for the matching core (§1); this module defines the validated,
//! structured value the core actually consumes. Spec §6 describes a
//! `Command` as "a structured record with fields `{format, action,
//! order_id, timestamp, symbol, side, order_type, price, quantity}`"
//! disambiguated by a `format` tag. A tagged enum is the idiomatic Rust
//! rendering of that description — each variant carries exactly the
//! fields its `format`/`action` combination needs, so a caller can't
//! construct a nonsensical command (an Amend missing a price, say) the
//! way an all-`Option` struct would allow. See `DESIGN.md`.

use crate::price::Price;
use crate::types::{OrderId, OrderType, Quantity, Side, Symbol, Timestamp};

/// A validated command, ready for [`crate::orderbook::engine::Engine::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Admit a new order.
    New {
        order_id: OrderId,
        timestamp: Timestamp,
        symbol: Symbol,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    /// Amend an existing order's price/quantity in place.
    Amend {
        order_id: OrderId,
        timestamp: Timestamp,
        symbol: Symbol,
        order_type: OrderType,
        side: Side,
        price: Price,
        quantity: Quantity,
    },
    /// Cancel an existing order. Carries no symbol or side — the engine
    /// resolves both from the [`crate::orderbook::directory::SymbolDirectory`]
    /// (spec §4.5).
    Cancel {
        order_id: OrderId,
        timestamp: Timestamp,
    },
    /// Run the match loop on every symbol, in ascending symbol order.
    MatchAll { timestamp: Timestamp },
    /// Run the match loop on one symbol. A no-op, not an error, if the
    /// symbol is unknown (spec §4.5).
    MatchSymbol { timestamp: Timestamp, symbol: Symbol },
    /// Snapshot every symbol's top-5 book "as of now" (the engine's
    /// current clock).
    QueryAll,
    /// Snapshot one symbol's top-5 book "as of now". Missing symbols emit
    /// nothing.
    QuerySymbol { symbol: Symbol },
    /// Snapshot every symbol's top-5 book as of a past instant. This
    /// `timestamp` is a pure as-of parameter: it is not subject to the
    /// monotonic-clock check (I1) and does not advance the engine's clock
    /// — see `DESIGN.md`'s resolution of this, forced by the worked
    /// example in spec §8.6.
    QueryAsOf { timestamp: Timestamp },
    /// Snapshot one symbol's top-5 book as of a past instant.
    QuerySymbolAsOf { timestamp: Timestamp, symbol: Symbol },
}
