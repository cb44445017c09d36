//! Binscan Domain Layer
//!
//! Value types and boundary traits shared by every other binscan crate.
//! Nothing in here performs I/O.
//!
//! ## Key Concepts
//!
//! - **Bin**: a normalized 6-8 digit issuer identification number, the
//!   uniqueness key for a whole run
//! - **BinDetails**: the enrichment payload returned by the lookup service
//! - **Record**: one output row, a bin plus its enrichment outcome and note
//! - **RunResult**: every record of one run, in ascending bin order
//! - **Attempt**: the typed outcome of a single lookup call, which drives retries
//!
//! ## Architecture
//!
//! Infrastructure (HTTP transports, file sinks) lives in other crates and plugs
//! in through the traits in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bin;
pub mod details;
pub mod error;
pub mod lookup;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use bin::{Bin, BIN_MAX_LEN, BIN_MIN_LEN};
pub use details::BinDetails;
pub use error::DomainError;
pub use lookup::{Attempt, Enrichment, LookupResponse};
pub use record::{LookupNote, Record, RunResult};
