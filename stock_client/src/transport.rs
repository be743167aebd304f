//! Sending quote requests over HTTP.
//!
//! The client never talks to `reqwest` directly; it goes through the
//! [`Transport`] trait so the request can be inspected (and counted) in tests.
//! [`ReqwestTransport`] is the real implementation on top of
//! `reqwest::blocking::Client` with the library's default timeout. Redirects
//! are never followed, so the API key header only reaches the configured host.
use std::error::Error as StdError;
use std::io;

use log::debug;
use reqwest::Url;
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use stock_common::{FetchError, TransportError, TransportKind};

/// Fully prepared GET request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Target URL including the query string.
    pub url: Url,
    /// Headers to attach.
    pub headers: HeaderMap,
}

/// Raw response handed back to the client for decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single blocking GET.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the status and body, or a classified transport failure.
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest` blocking transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the `reqwest` default 30 s timeout. A 3xx is
    /// returned as is and never followed.
    pub fn new() -> Result<Self, FetchError> {
        let client = client_builder().build().map_err(|e| {
            TransportError::new(
                TransportKind::Other,
                format!("Failed to construct blocking HTTP client: {}", e),
            )
        })?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("GET {}", request.url);
        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .send()
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| {
            TransportError::new(
                TransportKind::Body,
                format!("Failed to read response body: {}", e),
            )
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn client_builder() -> ClientBuilder {
    Client::builder().redirect(Policy::none())
}

/// Maps a `reqwest` failure onto a `TransportKind`.
fn classify(err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportKind::Timeout
    } else if let Some(io_kind) = io_error_kind(&err) {
        match io_kind {
            io::ErrorKind::TimedOut => TransportKind::Timeout,
            io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound => TransportKind::Connect,
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::Interrupted => TransportKind::Interrupted,
            _ if err.is_connect() => TransportKind::Connect,
            _ => TransportKind::Other,
        }
    } else if err.is_connect() {
        TransportKind::Connect
    } else if err.is_body() || err.is_decode() {
        TransportKind::Body
    } else {
        TransportKind::Other
    };

    TransportError::new(kind, err.to_string())
}

/// Finds the first `io::Error` in the source chain.
fn io_error_kind(err: &(dyn StdError + 'static)) -> Option<io::ErrorKind> {
    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io_err) = inner.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        source = inner.source();
    }
    None
}
