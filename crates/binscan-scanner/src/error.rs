//! Error types for scan runs

use thiserror::Error;

/// Errors that can abort a scan run
///
/// Per-source and per-identifier failures never show up here; they are
/// captured in the run's metrics and records instead.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a configuration file
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Failed to parse a configuration file
    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The sink could not persist the run
    #[error("Sink error: {0}")]
    Sink(String),
}
