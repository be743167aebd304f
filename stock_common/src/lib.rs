//!
//! Common types shared by the quote client and the polling monitor.
//!
//! This crate aggregates:
//! - `error` — the `FetchError` taxonomy every fetch failure is converted into.
//! - `result` — handy `Result<T, FetchError>` alias.
//! - `quote` — the immutable `Quote` observation.
//! - `endpoint` — fixed provider endpoint and header constants.
#![warn(missing_docs)]
pub mod endpoint;
pub mod error;
pub mod quote;
pub mod result;

pub use error::{FailureClass, FetchError, ParseError, TransportError, TransportKind};
pub use quote::Quote;
pub use result::Result;
