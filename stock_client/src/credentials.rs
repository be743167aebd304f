//! Static API credential attached to every request.
use std::fmt;

/// API key for the quote provider.
///
/// The key is supplied by the caller (flag or environment); where it comes
/// from is not this crate's concern. `Debug` never prints the key itself.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Wraps an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The raw key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// True when no usable key is present (empty or whitespace only).
    pub fn is_empty(&self) -> bool {
        self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_struct("Credentials").field("api_key", &shown).finish()
    }
}
