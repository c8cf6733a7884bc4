//! # limitbook
//!
//! A single-threaded equity limit-order matching engine: price-time
//! priority order books, one per symbol, driven by a small command
//! language and producing a deterministic event stream.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: buys rank by highest price then
//!   earliest arrival; sells by lowest price then earliest arrival.
//! - **Exact price arithmetic**: prices are scaled-integer cents, never
//!   floats, so two prices are equal iff they are numerically equal.
//! - **Point-in-time history**: every order keeps an append-only,
//!   capped alteration log and answers `as_of(t)` queries against it.
//! - **Deterministic multi-symbol dispatch**: a `SymbolDirectory` routes
//!   commands to per-symbol books and iterates them in ascending symbol
//!   order for every global operation.
//! - **Synchronous, single-threaded core**: one command in, zero or
//!   more events out, next command — no shared mutable state, no
//!   locking.
//!
//! ## Module Map
//!
//! - [`price`] — the scaled-integer [`price::Price`] type.
//! - [`types`] — shared scalars: [`types::OrderId`], [`types::Symbol`],
//!   [`types::Side`], [`types::OrderType`], [`types::ExecutionStatus`].
//! - [`orderbook`] — the matching core: [`orderbook::order::Order`],
//!   [`orderbook::side_book::SideBook`],
//!   [`orderbook::symbol_book::SymbolBook`],
//!   [`orderbook::directory::SymbolDirectory`], and the
//!   [`orderbook::engine::Engine`] dispatcher.
//! - [`command`] — the validated [`command::Command`] the engine
//!   consumes.
//! - [`event`] — the [`event::Event`] stream the engine produces and the
//!   exact line each event renders as.
//! - [`parser`] — a reference textual command-line parser.
//! - [`report`] — pluggable [`report::ReportSink`] implementations that
//!   consume the event stream.
//!
//! ## Status
//!
//! This project is a from-scratch matching core; it has no persistence,
//! no networking, and no concurrency. See `DESIGN.md` for the reasoning
//! behind that scope.

pub mod command;
pub mod event;
pub mod orderbook;
pub mod parser;
pub mod price;
pub mod report;
pub mod types;

pub mod prelude;

pub use command::Command;
pub use event::{Event, SnapshotRow, TradeEvent};
pub use orderbook::{Engine, EngineConfig, EngineError, RejectError, SymbolBook, SymbolDirectory};
pub use price::Price;
pub use report::{JsonReportSink, LineReportSink, ReportSink, VecReportSink};
pub use types::{ExecutionStatus, OrderId, OrderType, Quantity, Side, Symbol, Timestamp};
