//! Binscan Scanner
//!
//! Run orchestration: fetch every configured source, extract and pool
//! candidate BINs, enrich the unique set, build records and apply filters.
//!
//! # Overview
//!
//! - **Sources** are fetched in configured order. A source that cannot be
//!   fetched is logged and skipped; the run continues with the rest.
//! - **Extraction** tries a table parse per source and falls back to raw text.
//! - **Enrichment** covers the full unique set before any filtering. With
//!   `concurrency = 1` identifiers are enriched one at a time in ascending
//!   order; larger values use a bounded worker pool sharing one rate limiter,
//!   and records are re-keyed into ascending order afterwards.
//! - **Filters** (country, then prepaid) narrow the records last.
//!
//! # Usage
//!
//! ```
//! use binscan_lookup::{MockLookup, MockReply};
//! use binscan_scanner::{Filters, ScanConfig, Scanner, StaticFetcher};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut config = ScanConfig::default();
//! config.sources = vec!["mem://bins".to_string()];
//! config.lookup.pacing_ms = 0;
//!
//! let fetcher = StaticFetcher::new().with_source("mem://bins", "bin\n411111\n411111\n");
//! let scanner = Scanner::from_config(fetcher, MockLookup::new(MockReply::NoData), &config);
//!
//! let outcome = scanner.run(&Filters::none()).await;
//! assert_eq!(outcome.result.len(), 1);
//! println!("{}", outcome.metrics.summary());
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fetcher;
mod filters;
mod metrics;
mod scanner;

pub use binscan_store::OutputConfig;
pub use config::{ScanConfig, DEFAULT_SOURCES};
pub use error::ScanError;
pub use fetcher::{FetchError, HttpFetcher, StaticFetcher};
pub use filters::Filters;
pub use metrics::ScanMetrics;
pub use scanner::{run_to_sink, ScanOutcome, Scanner};
