//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scan could not be completed
    #[error(transparent)]
    Scan(#[from] binscan_scanner::ScanError),

    /// Server failed
    #[error(transparent)]
    Server(#[from] binscan_server::ServerError),

    /// Lookup client could not be set up
    #[error("Lookup error: {0}")]
    Lookup(#[from] binscan_lookup::LookupError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<binscan_server::config::ConfigError> for CliError {
    fn from(e: binscan_server::config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
