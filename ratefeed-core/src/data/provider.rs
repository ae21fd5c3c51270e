//! Rate source trait and structured fetch errors.
//!
//! The RateSource trait abstracts over where raw CSV history comes from so
//! the pipeline can run against the live Yahoo endpoint or a scripted source
//! in tests.

use crate::domain::TimeWindow;
use thiserror::Error;

/// Structured error types for a single fetch attempt.
///
/// None of these are retried by the source itself; the pipeline decides
/// whether to try another symbol.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error fetching {symbol}: {message}")]
    Transport { symbol: String, message: String },

    #[error("HTTP {status} fetching {symbol}")]
    Status { symbol: String, status: u16 },

    #[error("unreadable response body for {symbol}: {message}")]
    Body { symbol: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Symbol the failed request was for, if the error is tied to one.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            FetchError::Transport { symbol, .. }
            | FetchError::Status { symbol, .. }
            | FetchError::Body { symbol, .. } => Some(symbol),
            FetchError::Client(_) => None,
        }
    }
}

/// Trait for sources of daily historical quotes as CSV text.
///
/// Implementations return the body untouched; parsing is the transform's job.
pub trait RateSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch daily history for `symbol` over `window` as raw CSV text.
    fn fetch(&self, symbol: &str, window: &TimeWindow) -> Result<String, FetchError>;
}
