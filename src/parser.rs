//! Reference textual command-line parser (spec §1, §6, §8's scenario
//! grammar).
//!
//! The matching core takes a structured [`Command`] and has no opinion on
//! how one gets produced; this module is one concrete way, reading the
//! comma-separated lines used throughout the spec's worked scenarios:
//!
//! ```text
//! N,<id>,<ts>,<symbol>,<type>,<side>,<price>,<qty>   new order
//! A,<id>,<ts>,<symbol>,<type>,<side>,<price>,<qty>   amend
//! X,<id>,<ts>                                        cancel
//! M,<ts>                                              match every symbol
//! M,<ts>,<symbol>                                     match one symbol
//! Q                                                    query every symbol, now
//! Q,<symbol>                                           query one symbol, now
//! Q,<ts>,<symbol>                                      query one symbol, as of ts
//! ```
//!
//! A bare `Q,<ts>` with no symbol (query every symbol as of a past
//! instant) is accepted too, disambiguated from `Q,<symbol>` by whether
//! the lone field parses as a timestamp.

use std::fmt;

use crate::command::Command;
use crate::price::Price;
use crate::types::{OrderId, OrderType, Side, Symbol, Timestamp};

/// A line that does not match any recognized grammar form. The caller
/// decides how to render this — the reference binary turns it into a
/// `303 - InvalidOrderDetails` style message (spec §7: "a structurally
/// malformed command from the parser").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: String,
    pub reason: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse {:?}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ParseError {}

fn err(line: &str, reason: impl Into<String>) -> ParseError {
    ParseError {
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn field<'a>(line: &str, parts: &[&'a str], index: usize, name: &str) -> Result<&'a str, ParseError> {
    parts
        .get(index)
        .copied()
        .ok_or_else(|| err(line, format!("missing field {index} ({name})")))
}

fn parse_id(line: &str, s: &str) -> Result<OrderId, ParseError> {
    s.parse::<u64>().map(OrderId).map_err(|_| err(line, format!("invalid order id {s:?}")))
}

fn parse_ts(line: &str, s: &str) -> Result<Timestamp, ParseError> {
    s.parse::<Timestamp>().map_err(|_| err(line, format!("invalid timestamp {s:?}")))
}

fn parse_symbol(line: &str, s: &str) -> Result<Symbol, ParseError> {
    s.parse::<Symbol>().map_err(|_| err(line, format!("invalid symbol {s:?}")))
}

fn parse_side(line: &str, s: &str) -> Result<Side, ParseError> {
    match s {
        "B" => Ok(Side::Buy),
        "S" => Ok(Side::Sell),
        other => Err(err(line, format!("invalid side {other:?}"))),
    }
}

fn parse_order_type(line: &str, s: &str) -> Result<OrderType, ParseError> {
    s.parse::<OrderType>().map_err(|_| err(line, format!("invalid order type {s:?}")))
}

fn parse_price(line: &str, s: &str) -> Result<Price, ParseError> {
    s.parse::<Price>().map_err(|_| err(line, format!("invalid price {s:?}")))
}

fn parse_qty(line: &str, s: &str) -> Result<u64, ParseError> {
    s.parse::<u64>().map_err(|_| err(line, format!("invalid quantity {s:?}")))
}

/// Parses a single command line. Blank lines and lines starting with `#`
/// are not commands — callers filtering a whole program should skip those
/// before calling this.
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    let action = field(trimmed, &parts, 0, "action")?;
    match action {
        "N" | "A" => {
            let order_id = parse_id(trimmed, field(trimmed, &parts, 1, "order_id")?)?;
            let timestamp = parse_ts(trimmed, field(trimmed, &parts, 2, "timestamp")?)?;
            let symbol = parse_symbol(trimmed, field(trimmed, &parts, 3, "symbol")?)?;
            let order_type = parse_order_type(trimmed, field(trimmed, &parts, 4, "order_type")?)?;
            let side = parse_side(trimmed, field(trimmed, &parts, 5, "side")?)?;
            let price = parse_price(trimmed, field(trimmed, &parts, 6, "price")?)?;
            let quantity = parse_qty(trimmed, field(trimmed, &parts, 7, "quantity")?)?;
            if action == "N" {
                Ok(Command::New { order_id, timestamp, symbol, order_type, side, price, quantity })
            } else {
                Ok(Command::Amend { order_id, timestamp, symbol, order_type, side, price, quantity })
            }
        }
        "X" => {
            let order_id = parse_id(trimmed, field(trimmed, &parts, 1, "order_id")?)?;
            let timestamp = parse_ts(trimmed, field(trimmed, &parts, 2, "timestamp")?)?;
            Ok(Command::Cancel { order_id, timestamp })
        }
        "M" => {
            let timestamp = parse_ts(trimmed, field(trimmed, &parts, 1, "timestamp")?)?;
            match parts.get(2) {
                None => Ok(Command::MatchAll { timestamp }),
                Some(sym) => Ok(Command::MatchSymbol { timestamp, symbol: parse_symbol(trimmed, sym)? }),
            }
        }
        "Q" => match (parts.get(1), parts.get(2)) {
            (None, _) => Ok(Command::QueryAll),
            (Some(one), None) => {
                // Disambiguate `Q,<ts>` (as-of, every symbol) from
                // `Q,<symbol>` (now, one symbol) by whether it parses as a
                // timestamp.
                if let Ok(timestamp) = one.parse::<Timestamp>() {
                    Ok(Command::QueryAsOf { timestamp })
                } else {
                    Ok(Command::QuerySymbol { symbol: parse_symbol(trimmed, one)? })
                }
            }
            (Some(ts), Some(sym)) => {
                let timestamp = parse_ts(trimmed, ts)?;
                let symbol = parse_symbol(trimmed, sym)?;
                Ok(Command::QuerySymbolAsOf { timestamp, symbol })
            }
        },
        other => Err(err(trimmed, format!("unrecognized action {other:?}"))),
    }
}

/// Parses every non-blank, non-comment line of a whole program, in order.
pub fn parse_program(text: &str) -> Vec<Result<Command, ParseError>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_line)
        .collect()
}
