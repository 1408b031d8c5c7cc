//! Display-price parsing using decimal arithmetic.
//!
//! Archive prices are authored as display strings (`"$240"`, `"$25.50"`) and
//! shown verbatim. The cart subtotal needs the numeric value, so
//! [`DisplayPrice`] parses the string into a `rust_decimal::Decimal` on
//! demand. The parsed amount is display-only and never authoritative.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency symbols stripped from the front of a display price.
const CURRENCY_SYMBOLS: &[char] = &['$', '\u{20ac}', '\u{a3}'];

/// Error parsing a display price string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("empty price string")]
    Empty,
    #[error("not a decimal amount: {0}")]
    NotDecimal(String),
}

/// A price as authored in the admin editor, e.g. `"$240"`.
///
/// Wraps the raw display string; use [`DisplayPrice::amount`] for the
/// numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DisplayPrice(String);

impl DisplayPrice {
    /// Create a display price from the authored string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw display string, shown verbatim in the UI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the numeric amount.
    ///
    /// Strips a leading currency symbol, surrounding whitespace, and
    /// thousands separators, then parses the rest as a decimal.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the string is empty or the remainder is not a
    /// decimal number.
    pub fn amount(&self) -> Result<Decimal, PriceError> {
        let trimmed = self.0.trim().trim_start_matches(CURRENCY_SYMBOLS).trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let normalized: String = trimmed.chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&normalized).map_err(|_| PriceError::NotDecimal(self.0.clone()))
    }
}

impl std::fmt::Display for DisplayPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DisplayPrice {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<String> for DisplayPrice {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_plain_dollars() {
        let price = DisplayPrice::new("$240");
        assert_eq!(price.amount().expect("parse"), Decimal::new(240, 0));
    }

    #[test]
    fn test_amount_with_cents() {
        let price = DisplayPrice::new("$25.50");
        assert_eq!(price.amount().expect("parse"), Decimal::new(2550, 2));
    }

    #[test]
    fn test_amount_thousands_separator() {
        let price = DisplayPrice::new("$1,240.00");
        assert_eq!(price.amount().expect("parse"), Decimal::new(124_000, 2));
    }

    #[test]
    fn test_amount_no_symbol() {
        let price = DisplayPrice::new("180");
        assert_eq!(price.amount().expect("parse"), Decimal::new(180, 0));
    }

    #[test]
    fn test_amount_empty_is_error() {
        assert_eq!(DisplayPrice::new("").amount(), Err(PriceError::Empty));
        assert_eq!(DisplayPrice::new("$").amount(), Err(PriceError::Empty));
    }

    #[test]
    fn test_amount_garbage_is_error() {
        let price = DisplayPrice::new("$ask-us");
        assert!(matches!(price.amount(), Err(PriceError::NotDecimal(_))));
    }

    #[test]
    fn test_display_is_verbatim() {
        let price = DisplayPrice::new("$25.50");
        assert_eq!(price.to_string(), "$25.50");
    }
}
