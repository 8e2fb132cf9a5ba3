//! Error types for currency rate retrieval

use thiserror::Error;

/// Fatal errors surfaced by a rates fetch.
///
/// Per-entry parse failures never show up here; malformed or zero rates are
/// dropped by the extractor.
#[derive(Error, Debug)]
pub enum CurrencyError {
    /// Connect, TLS, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned {status} for {url}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Body stream ended unexpectedly before a single byte arrived
    #[error("Upstream body from {url} ended before any data was received")]
    EmptyBody { url: String },

    /// Payload had no `code:rate` tokens at all
    #[error("no currencies found")]
    NoDataFound,
}

impl CurrencyError {
    /// True for the transport class of failures (everything except
    /// `NoDataFound`).
    pub fn is_transport(&self) -> bool {
        !matches!(self, CurrencyError::NoDataFound)
    }
}

pub type Result<T> = std::result::Result<T, CurrencyError>;
