//! Shared scalar types for the matching core.

use std::fmt;
use std::str::FromStr;

/// A command timestamp. Monotonically non-decreasing across the command
/// stream (see [`crate::orderbook::engine::Engine`]'s I1 invariant).
pub type Timestamp = u64;

/// An order quantity. Zero means fully filled.
pub type Quantity = u64;

/// A unique order identifier, supplied by the command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub u64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(v: u64) -> Self {
        OrderId(v)
    }
}

/// A 1–4 letter uppercase-ASCII ticker symbol, stored inline (no heap
/// allocation) so it can be copied freely through the book hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Symbol {
    bytes: [u8; 4],
    len: u8,
}

/// Error returned when a string is not a valid [`Symbol`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolParseError(pub String);

impl fmt::Display for SymbolParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid symbol: {}", self.0)
    }
}

impl std::error::Error for SymbolParseError {}

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(SymbolParseError(s.to_string()));
        }
        let mut bytes = [0u8; 4];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Symbol {
            bytes,
            len: s.len() as u8,
        })
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Symbol {
    /// Borrows the symbol as a `&str`.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).expect("ASCII uppercase by construction")
    }
}

/// The side of an order or a resting queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "B"),
            Side::Sell => write!(f, "S"),
        }
    }
}

/// The order type tag. Only [`OrderType::Limit`] is required to behave as
/// described by the matching core; `Market` and `Ioc` carry their arrival
/// semantics (see `DESIGN.md`, Open Question 1) but are otherwise rendered
/// as plain tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    Ioc,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            OrderType::Market => "M",
            OrderType::Limit => "L",
            OrderType::Ioc => "I",
        };
        write!(f, "{tag}")
    }
}

/// Error returned when an order-type tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTypeParseError(pub String);

impl fmt::Display for OrderTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid order type: {}", self.0)
    }
}

impl std::error::Error for OrderTypeParseError {}

impl FromStr for OrderType {
    type Err = OrderTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(OrderType::Market),
            "L" => Ok(OrderType::Limit),
            "I" => Ok(OrderType::Ioc),
            other => Err(OrderTypeParseError(other.to_string())),
        }
    }
}

/// The lifecycle status of an order at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ExecutionStatus {
    NotExecuted,
    PartiallyExecuted,
    Executed,
    Cancelled,
}

impl ExecutionStatus {
    /// An order is active iff its current status is one of these two.
    pub fn is_active(self) -> bool {
        matches!(self, ExecutionStatus::NotExecuted | ExecutionStatus::PartiallyExecuted)
    }

    /// `Executed` and `Cancelled` are terminal; no further alteration may
    /// follow one in an order's history (I4).
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}
