//! Quote data model.
//!
//! A `Quote` is one observation of an instrument's price. It carries the
//! queried symbol, the provider's display name, the price as an exact decimal
//! and the provider's timestamp string exactly as received. Quotes are
//! validated once at construction and cannot be changed afterwards: all
//! fields are private and only getters are exposed.
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ParseError;

/// Market quote for a single symbol.
///
/// A quote cannot be modified once built:
///
/// ```compile_fail
/// use rust_decimal::Decimal;
/// use stock_common::Quote;
///
/// let mut quote = Quote::new("AAPL", "Apple Inc", Decimal::ONE, "2024-05-17 20:00:00").unwrap();
/// quote.price = Decimal::TEN;
/// ```
///
/// ```
/// use rust_decimal::Decimal;
/// use stock_common::Quote;
///
/// let quote = Quote::new("AAPL", "Apple Inc", Decimal::ONE, "2024-05-17 20:00:00").unwrap();
/// assert_eq!(quote.price(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    symbol: String,
    name: String,
    price: Decimal,
    timestamp: String,
}

impl Quote {
    /// Validates and builds a quote.
    ///
    /// `name` and `timestamp` must be non-empty and `price` must not be negative.
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
        timestamp: impl Into<String>,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        let timestamp = timestamp.into();

        if name.trim().is_empty() {
            return Err(ParseError::invalid("data.name", "empty name"));
        }
        if timestamp.trim().is_empty() {
            return Err(ParseError::invalid("data.last_update_utc", "empty timestamp"));
        }
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ParseError::invalid(
                "data.price",
                format!("negative price {}", price),
            ));
        }

        Ok(Quote {
            symbol: symbol.into(),
            name,
            price,
            timestamp,
        })
    }

    /// Symbol the quote was requested for.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display name reported by the provider.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Provider timestamp, e.g. `2024-05-17 20:59:59`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stock Name: {}", self.name)?;
        writeln!(f, "Stock Price: {}", self.price)?;
        write!(f, "Timestamp: {}", self.timestamp)
    }
}
