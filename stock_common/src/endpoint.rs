//! Provider endpoint constants.
//!
//! Quotes come from the RapidAPI "real-time-finance-data" service. The base
//! endpoint, the language parameter and the host header are fixed; only the
//! symbol and the API key vary per request.

/// Base URL of the stock quote endpoint (query string is appended by the client).
pub const QUOTE_ENDPOINT: &str = "https://real-time-finance-data.p.rapidapi.com/stock-quote";
/// Value of the `language` query parameter.
pub const LANGUAGE: &str = "en";
/// Host identifier sent in [`HOST_HEADER`].
pub const API_HOST: &str = "real-time-finance-data.p.rapidapi.com";
/// Header carrying the API key.
pub const KEY_HEADER: &str = "x-rapidapi-key";
/// Header carrying the fixed host identifier.
pub const HOST_HEADER: &str = "x-rapidapi-host";
