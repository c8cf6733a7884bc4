//! Scaled-integer price representation.
//!
//! A single-precision float cannot guarantee exact equality at two decimal
//! digits, so prices are stored as a non-negative count of whole cents and
//! rendered back with exactly two fractional digits.

use std::fmt;
use std::str::FromStr;

/// A non-negative price with exactly two fractional digits, stored as a
/// scaled integer (whole cents) so that equality and ordering are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Price(u64);

/// Error returned when a price string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceParseError(pub String);

impl fmt::Display for PriceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid price: {}", self.0)
    }
}

impl std::error::Error for PriceParseError {}

impl Price {
    /// Constructs a price directly from a whole-cents count.
    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    /// The underlying whole-cents value.
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Zero price.
    pub const ZERO: Price = Price(0);
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = match s.split_once('.') {
            Some(parts) => parts,
            None => (s, "00"),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceParseError(s.to_string()));
        }
        if frac.len() != 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceParseError(s.to_string()));
        }
        let whole: u64 = whole
            .parse()
            .map_err(|_| PriceParseError(s.to_string()))?;
        let frac: u64 = frac
            .parse()
            .map_err(|_| PriceParseError(s.to_string()))?;
        let cents = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(|| PriceParseError(s.to_string()))?;
        Ok(Price(cents))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
