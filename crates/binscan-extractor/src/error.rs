//! Error types for the Extractor

use thiserror::Error;

/// Errors from the structured (tabular) parse
///
/// These never escape a source scan: [`crate::extract_from_source`] turns them
/// into a raw-text fallback.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The content is not well-formed CSV
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The content has no header row
    #[error("Table has no header row")]
    MissingHeader,
}
