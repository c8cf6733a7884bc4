//! Error taxonomy for the matching core (spec §7).
//!
//! Two tiers: [`RejectError`] is recoverable at command granularity and
//! always ends up rendered as a `Reject`/`AmendReject`/`CancelReject`
//! [`crate::event::Event`]; [`EngineError`] is fatal (capacity overflow)
//! and terminates the engine. Neither is ever raised by unwinding — both
//! are explicit return values, following the teacher's `OrderBookError`
//! convention of a hand-written `Display`/`std::error::Error` impl rather
//! than a `thiserror` derive.

use std::fmt;

use crate::types::{OrderId, Symbol};

/// A numeric error code from §6.
pub const CODE_INVALID_AMENDMENT_DETAILS: u16 = 101;
pub const CODE_INVALID_ORDER_DETAILS: u16 = 303;
pub const CODE_ORDER_DOES_NOT_EXIST: u16 = 404;

/// A recoverable rejection, carrying the numeric code and message that the
/// report writer renders verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RejectError {
    /// Timestamp regressed relative to the engine's clock (I1), or another
    /// structurally invalid detail slipped past the parser.
    InvalidOrderDetails { message: String },

    /// An amendment whose new fields would violate an invariant. Reserved:
    /// the matching core itself never produces this — the parser or an
    /// upstream validator does — but the code is wired through so a future
    /// validator has somewhere to plug in.
    InvalidAmendmentDetails { message: String },

    /// An amend or cancel referenced an order id, or a cancel referenced a
    /// symbol, that the directory has no record of.
    OrderDoesNotExist { message: String },
}

impl RejectError {
    pub fn code(&self) -> u16 {
        match self {
            RejectError::InvalidOrderDetails { .. } => CODE_INVALID_ORDER_DETAILS,
            RejectError::InvalidAmendmentDetails { .. } => CODE_INVALID_AMENDMENT_DETAILS,
            RejectError::OrderDoesNotExist { .. } => CODE_ORDER_DOES_NOT_EXIST,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RejectError::InvalidOrderDetails { message } => message,
            RejectError::InvalidAmendmentDetails { message } => message,
            RejectError::OrderDoesNotExist { message } => message,
        }
    }

    pub fn order_does_not_exist() -> Self {
        RejectError::OrderDoesNotExist {
            message: "Order does not exist".to_string(),
        }
    }

    pub fn timestamp_out_of_order() -> Self {
        RejectError::InvalidOrderDetails {
            message: "timestamp out of order".to_string(),
        }
    }
}

impl fmt::Display for RejectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for RejectError {}

/// A fatal, non-recoverable condition. The engine does not attempt to
/// continue processing commands after one of these (§7: "Fatal.
/// Capacity overflow in a SideBook or in the symbol directory. Not
/// recoverable; engine terminates.").
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// A `SideBook` reached its configured capacity and could not accept
    /// another active order.
    SideBookCapacityExceeded {
        order_id: OrderId,
        capacity: usize,
    },

    /// The `SymbolDirectory` reached its configured capacity and could not
    /// register another distinct symbol.
    SymbolDirectoryCapacityExceeded {
        symbol: Symbol,
        capacity: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SideBookCapacityExceeded { order_id, capacity } => write!(
                f,
                "side book capacity ({capacity}) exceeded admitting order {order_id}"
            ),
            EngineError::SymbolDirectoryCapacityExceeded { symbol, capacity } => write!(
                f,
                "symbol directory capacity ({capacity}) exceeded registering symbol {symbol}"
            ),
        }
    }
}

impl std::error::Error for EngineError {}
