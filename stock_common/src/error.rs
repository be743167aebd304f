//! Error types shared between the client and the monitor.
//!
//! Every way a fetch can fail ends up as one of three `FetchError` variants:
//! a caller-fixable configuration problem, a network-level transport failure,
//! or a response that could not be turned into a `Quote`. None of them is
//! retried; the monitor stops on the first one it sees.
use strum_macros::Display;
use thiserror::Error;

/// Coarse failure class reported in logs and to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailureClass {
    /// Missing or invalid credential or input.
    ConfigurationError,
    /// Connection refused, reset, timed out or interrupted.
    TransportError,
    /// The response body did not match the expected shape.
    ParseError,
}

/// Unified error type returned by a quote fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Missing/invalid credential or request input. No request was sent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network-level failure while sending the request or reading the body.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response could not be decoded into a quote.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// Builds a configuration error from a human-readable message.
    pub fn configuration<T: Into<String>>(msg: T) -> Self {
        FetchError::Configuration(msg.into())
    }

    /// Failure class of this error.
    pub fn class(&self) -> FailureClass {
        match self {
            FetchError::Configuration(_) => FailureClass::ConfigurationError,
            FetchError::Transport(_) => FailureClass::TransportError,
            FetchError::Parse(_) => FailureClass::ParseError,
        }
    }
}

/// What went wrong at the transport level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransportKind {
    /// The connection could not be established (refused, DNS, TLS).
    Connect,
    /// The transport gave up waiting.
    Timeout,
    /// The exchange was cut short (reset, interrupted).
    Interrupted,
    /// The response body could not be read.
    Body,
    /// Anything the transport did not classify.
    Other,
}

/// Network-level failure with its classification.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct TransportError {
    kind: TransportKind,
    message: String,
}

impl TransportError {
    /// Creates a transport error of the given kind.
    pub fn new<T: Into<String>>(kind: TransportKind, message: T) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classification of the failure.
    pub fn kind(&self) -> TransportKind {
        self.kind
    }

    /// Description reported by the transport.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Why a response body could not be turned into a `Quote`.
///
/// `MalformedJson` and `UnexpectedShape` separate "not JSON at all" from
/// "JSON, but not the document we asked for"; both are the same
/// [`FailureClass::ParseError`] to callers.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not syntactically valid JSON (or is truncated).
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[source] serde_json::Error),

    /// Valid JSON whose structure or value types do not match.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    /// A required field is absent or null. Holds the dotted path.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field is present but its value is unusable.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ParseError {
    /// Classifies a `serde_json` failure as malformed input or a shape mismatch.
    pub fn from_json(err: serde_json::Error) -> Self {
        if err.is_data() {
            ParseError::UnexpectedShape(err)
        } else {
            ParseError::MalformedJson(err)
        }
    }

    /// Builds an `InvalidField` error.
    pub fn invalid<T: Into<String>>(field: &'static str, reason: T) -> Self {
        ParseError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
