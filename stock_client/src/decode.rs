//! Decoding of the provider's quote payload.
//!
//! The provider answers with a JSON document of the shape
//! `{ "data": { "name": ..., "price": ..., "last_update_utc": ... } }` plus
//! fields we ignore. The price is taken from the raw JSON text so that
//! `123.45` becomes exactly `Decimal 123.45` instead of going through `f64`.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::value::RawValue;
use stock_common::{ParseError, Quote};

#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    data: Option<QuotePayload>,
}

#[derive(Debug, Deserialize)]
struct QuotePayload {
    name: Option<String>,
    price: Option<Box<RawValue>>,
    last_update_utc: Option<String>,
}

/// Decodes a response body into a `Quote` for `symbol`.
pub fn decode_quote(symbol: &str, body: &str) -> Result<Quote, ParseError> {
    let envelope: QuoteEnvelope = serde_json::from_str(body).map_err(ParseError::from_json)?;
    let data = envelope.data.ok_or(ParseError::MissingField("data"))?;

    let name = data.name.ok_or(ParseError::MissingField("data.name"))?;
    let raw_price = data.price.ok_or(ParseError::MissingField("data.price"))?;
    let timestamp = data
        .last_update_utc
        .ok_or(ParseError::MissingField("data.last_update_utc"))?;

    let price = parse_price(&raw_price)?;
    Quote::new(symbol, name, price, timestamp)
}

/// Reads a price from its raw JSON text. Numeric strings are accepted as well.
fn parse_price(raw: &RawValue) -> Result<Decimal, ParseError> {
    let text = raw.get().trim();
    if text.starts_with('"') {
        let inner: String = serde_json::from_str(text).map_err(ParseError::from_json)?;
        return parse_decimal(inner.trim());
    }
    if text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return parse_decimal(text);
    }
    Err(ParseError::invalid(
        "data.price",
        format!("expected a number, found `{}`", text),
    ))
}

fn parse_decimal(text: &str) -> Result<Decimal, ParseError> {
    // The mantissa of scientific notation must itself be exact.
    let parsed = match text.split_once(['e', 'E']) {
        None => Decimal::from_str_exact(text),
        Some((mantissa, _)) => {
            Decimal::from_str_exact(mantissa).and_then(|_| Decimal::from_scientific(text))
        }
    };
    parsed.map_err(|e| {
        ParseError::invalid(
            "data.price",
            format!("`{}` is not an exact decimal: {}", text, e),
        )
    })
}
