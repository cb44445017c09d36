//! Configuration file parsing for the server.
//!
//! Loads the bind address, cache lifetime and the nested scan settings used
//! for the background run.

use binscan_scanner::ScanConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
///
/// ```toml
/// bind_address = "0.0.0.0"
/// bind_port = 8080
/// cache_max_age_secs = 3600
///
/// [scan]
/// sources = ["https://example.com/bins.csv"]
///
/// [scan.lookup]
/// rate_limit_per_sec = 2
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// `max-age` sent with the artifact, in seconds (default: 3600)
    pub cache_max_age_secs: u64,

    /// Settings for the background scan
    pub scan: ScanConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            cache_max_age_secs: 3600,
            scan: ScanConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        self.scan
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
