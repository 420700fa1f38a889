//! Error taxonomy shared by catalogue sources and the content controller

use thiserror::Error;

/// Errors that can occur while looking up or navigating catalogue entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Transport failure, timeout, bad status or undecodable payload
    #[error("Network error: {0}")]
    Network(String),

    /// The entry or the requested part of it does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A direct lookup outside the catalogue bounds
    #[error("Index {value} out of range (1..={max})")]
    OutOfRange { value: i64, max: u32 },

    /// The request was superseded or torn down before it resolved
    #[error("Request cancelled")]
    Cancelled,
}

impl CatalogError {
    /// Whether this error should replace slot content with a fallback.
    ///
    /// Validation failures are rejected at the input and cancellations never
    /// reach the view, so only lookup failures qualify.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, CatalogError::Network(_) | CatalogError::NotFound(_))
    }
}
