//! Quote Client — performs one blocking request against the quote provider and
//! turns the response into a typed `Quote` or a typed `FetchError`.
//!
//! Usage example:
//! ```no_run
//! use stock_client::{Credentials, QuoteClient};
//!
//! # fn main() -> Result<(), stock_common::FetchError> {
//! let client = QuoteClient::new()?;
//! let credentials = Credentials::new(std::env::var("RAPIDAPI_KEY").unwrap_or_default());
//! match client.fetch(".DJI:INDEXDJX", &credentials) {
//!     Ok(quote) => println!("{quote}"),
//!     Err(e) => eprintln!("{} ({})", e, e.class()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client keeps no state between calls. The scheduler consumes it through
//! the [`QuoteSource`] trait, usually via an [`AuthorizedClient`].
#![warn(missing_docs)]
pub mod client;
pub mod credentials;
pub mod decode;
pub mod transport;

pub use client::{AuthorizedClient, QuoteClient, QuoteSource};
pub use credentials::Credentials;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
