//! Binscan Extractor
//!
//! Finds candidate BINs in untyped source text and reduces them to the sorted
//! unique identifier set that enrichment runs over.
//!
//! # Architecture
//!
//! ```text
//! source text → table parse ─┐
//!             (fallback) raw ─┴→ candidates → normalize → dedup → Vec<Bin>
//! ```
//!
//! # Key Features
//!
//! - **Candidate extraction**: every maximal run of 6-8 ASCII digits
//! - **Tabular parse with fallback**: CSV cells are scanned first; malformed or
//!   empty results fall back to scanning the raw text
//! - **Normalization**: 8+ digits keep the first 8, anything shorter keeps the first 6
//! - **Deterministic order**: the unique set is returned in ascending string order
//!
//! # Example Usage
//!
//! ```
//! use binscan_extractor::{extract_from_source, CandidatePool};
//!
//! let mut pool = CandidatePool::new();
//! pool.extend(extract_from_source("bin,brand\n411111,visa\n").candidates);
//! pool.extend(extract_from_source("acct 411111xx 555555444444 tail").candidates);
//!
//! let bins = pool.into_bins();
//! assert_eq!(bins.len(), 1);
//! assert_eq!(bins[0].as_str(), "411111");
//! ```

#![warn(missing_docs)]

mod candidates;
mod error;
mod normalize;
mod source;
mod table;


pub use candidates::{extract_candidates, extract_from_raw_text};
pub use error::ExtractorError;
pub use normalize::{normalize, unique_bins, CandidatePool};
pub use source::{extract_from_source, SourceExtraction};
pub use table::extract_from_table;
