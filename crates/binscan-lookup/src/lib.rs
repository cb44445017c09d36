//! Binscan Lookup Layer
//!
//! Enrichment client for the public BIN lookup service.
//!
//! # Architecture
//!
//! Transports implement `BinLookup` from `binscan-domain` and perform exactly one
//! call per [`attempt`](binscan_domain::traits::BinLookup::attempt). The
//! [`Enricher`] wraps a transport with the shared [`RateLimiter`], the
//! [`RetryPolicy`] and a fixed pacing delay, and turns the typed attempts into
//! one final [`Enrichment`](binscan_domain::Enrichment) per identifier.
//!
//! # Transports
//!
//! - `BinlistClient`: HTTP client for `lookup.binlist.net`-compatible services
//! - `MockLookup`: scripted replies for tests and dry runs
//!
//! # Examples
//!
//! ```
//! use binscan_domain::{Bin, Enrichment};
//! use binscan_lookup::{Enricher, LookupConfig, MockLookup, MockReply};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mock = MockLookup::new(MockReply::NoData);
//! let config = LookupConfig { pacing_ms: 0, ..LookupConfig::default() };
//! let enricher = Enricher::new(mock, &config);
//!
//! let report = enricher.enrich(&Bin::parse("411111").unwrap()).await;
//! assert_eq!(report.enrichment, Enrichment::NoData);
//! # }
//! ```

#![warn(missing_docs)]

pub mod binlist;
pub mod config;
pub mod enricher;
pub mod limiter;
pub mod mock;
pub mod retry;

use thiserror::Error;

pub use binlist::BinlistClient;
pub use config::LookupConfig;
pub use enricher::{CancelHandle, EnrichReport, Enricher};
pub use limiter::RateLimiter;
pub use mock::{MockLookup, MockReply};
pub use retry::RetryPolicy;

/// Errors that can occur during a lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The service answered 429
    #[error("rate limited by lookup service (HTTP 429)")]
    RateLimited,

    /// The request timed out
    #[error("request timed out")]
    Timeout,

    /// Network or protocol failure before a status was received
    #[error("transport error: {0}")]
    Transport(String),

    /// Unexpected HTTP status
    #[error("HTTP {code}: {reason}")]
    Status {
        /// Status code
        code: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// 200 response whose body is not a lookup payload
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The run was cancelled before this identifier settled
    #[error("cancelled")]
    Cancelled,

    /// The HTTP client could not be built
    #[error("client error: {0}")]
    Client(String),

    /// Invalid lookup configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl LookupError {
    /// Build a status error from a code
    pub fn status(code: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_string();
        LookupError::Status { code, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        assert_eq!(LookupError::status(500).to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(LookupError::status(599).to_string(), "HTTP 599: Unknown");
    }
}
