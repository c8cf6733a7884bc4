//! Convenience re-exports of the types most callers need.

pub use crate::command::Command;
pub use crate::event::{Event, SnapshotRow, TradeEvent};
pub use crate::orderbook::{Engine, EngineConfig, EngineError, RejectError};
pub use crate::price::Price;
pub use crate::report::{JsonReportSink, LineReportSink, ReportSink, VecReportSink};
pub use crate::types::{ExecutionStatus, OrderId, OrderType, Quantity, Side, Symbol, Timestamp};
