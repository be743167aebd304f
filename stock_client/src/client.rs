//! Quote fetching.
//!
//! `QuoteClient::fetch` builds the request, sends it through a [`Transport`]
//! and decodes the answer. Validation happens before the transport is touched:
//! an empty API key or symbol fails with a configuration error and no request
//! is sent.
use log::{debug, warn};
use reqwest::Url;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use stock_common::endpoint::{API_HOST, HOST_HEADER, KEY_HEADER, LANGUAGE, QUOTE_ENDPOINT};
use stock_common::{FetchError, Quote, Result};

use crate::credentials::Credentials;
use crate::decode::decode_quote;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Anything that can produce the current quote for a symbol.
///
/// The polling scheduler only depends on this trait.
pub trait QuoteSource: Send + Sync {
    /// Fetches one quote for `symbol`.
    fn fetch_quote(&self, symbol: &str) -> Result<Quote>;
}

/// Stateless quote client.
#[derive(Debug, Clone)]
pub struct QuoteClient<T = ReqwestTransport> {
    transport: T,
}

impl QuoteClient<ReqwestTransport> {
    /// Client backed by a default `reqwest` blocking transport.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }
}

impl<T: Transport> QuoteClient<T> {
    /// Client backed by a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the current quote for `symbol`.
    pub fn fetch(&self, symbol: &str, credentials: &Credentials) -> Result<Quote> {
        let request = build_request(symbol, credentials)?;
        let response = self.transport.get(&request)?;

        if !response.is_success() {
            warn!(
                "Quote request for {} returned HTTP {}",
                symbol, response.status
            );
        }

        let quote = decode_quote(symbol, &response.body)?;
        debug!("Decoded quote for {}: {} @ {}", symbol, quote.price(), quote.timestamp());
        Ok(quote)
    }

    /// Binds credentials so the client can act as a [`QuoteSource`].
    pub fn authorize(self, credentials: Credentials) -> AuthorizedClient<T> {
        AuthorizedClient {
            client: self,
            credentials,
        }
    }
}

/// A `QuoteClient` paired with the credentials to use on every fetch.
#[derive(Debug, Clone)]
pub struct AuthorizedClient<T = ReqwestTransport> {
    client: QuoteClient<T>,
    credentials: Credentials,
}

impl<T: Transport> AuthorizedClient<T> {
    /// The wrapped client.
    pub fn client(&self) -> &QuoteClient<T> {
        &self.client
    }
}

impl<T: Transport> QuoteSource for AuthorizedClient<T> {
    fn fetch_quote(&self, symbol: &str) -> Result<Quote> {
        self.client.fetch(symbol, &self.credentials)
    }
}

/// Validates inputs and assembles the GET request.
pub fn build_request(symbol: &str, credentials: &Credentials) -> Result<HttpRequest> {
    if credentials.is_empty() {
        return Err(FetchError::configuration("API key is empty"));
    }
    if symbol.trim().is_empty() {
        return Err(FetchError::configuration("Symbol is empty"));
    }

    let url = Url::parse_with_params(QUOTE_ENDPOINT, &[("symbol", symbol), ("language", LANGUAGE)])
        .map_err(|e| FetchError::configuration(format!("Invalid quote URL: {}", e)))?;

    let key = HeaderValue::from_str(credentials.api_key().trim())
        .map_err(|_| FetchError::configuration("API key contains characters not allowed in a header"))?;

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(KEY_HEADER), key);
    headers.insert(
        HeaderName::from_static(HOST_HEADER),
        HeaderValue::from_static(API_HOST),
    );

    Ok(HttpRequest { url, headers })
}
