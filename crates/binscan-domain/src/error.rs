//! Error types for the domain layer

use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The value is not 6-8 ASCII digits
    #[error("Invalid BIN: {0:?} (expected 6-8 ASCII digits)")]
    InvalidBin(String),
}
