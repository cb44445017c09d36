//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the scan pipeline and
//! infrastructure. Implementations live in other crates.

use crate::{Attempt, Bin, RunResult};
use std::fmt::Display;
use std::future::Future;

/// Trait for retrieving raw source content
///
/// Implemented by the scanner layer (`HttpFetcher`, `StaticFetcher`)
pub trait SourceFetcher: Send + Sync {
    /// Error type for fetch operations
    type Error: Display + Send;

    /// Fetch the full text behind `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for a single call to the BIN lookup service
///
/// Implemented by the lookup layer (`BinlistClient`, `MockLookup`). One call,
/// no retries: the caller drives retries from the returned [`Attempt`].
pub trait BinLookup: Send + Sync {
    /// Error type carried by failed attempts
    type Error: Display + Send;

    /// Issue one lookup for `bin`
    fn attempt(&self, bin: &Bin) -> impl Future<Output = Attempt<Self::Error>> + Send;
}

/// Trait for persisting a finished run
///
/// Implemented by the store layer (`FileSink`)
pub trait RecordSink {
    /// Error type for persistence
    type Error: Display;

    /// Durably write every record of `run`
    fn persist(&self, run: &RunResult) -> Result<(), Self::Error>;
}
