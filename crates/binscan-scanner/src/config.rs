//! Configuration for scan runs
//!
//! Loaded from TOML; every field has a default so a partial file (or none at
//! all) is valid.
//!
//! ```toml
//! sources = ["https://example.com/bins.csv"]
//! enrich = true
//! fetch_timeout_secs = 8
//!
//! [lookup]
//! rate_limit_per_sec = 2
//! max_attempts = 3
//!
//! [output]
//! data_dir = "data"
//!
//! [filters]
//! only_country = "US"
//! prepaid_only = false
//! ```

use crate::{Filters, ScanError};
use binscan_lookup::LookupConfig;
use binscan_store::OutputConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Public BIN list datasets scanned by default
pub const DEFAULT_SOURCES: [&str; 3] = [
    "https://github.com/venelinkochev/bin-list-data/raw/refs/heads/master/bin-list-data.csv",
    "https://github.com/iannuttall/binlist-data/raw/refs/heads/master/binlist-data.csv",
    "https://github.com/binlist/data/raw/refs/heads/master/ranges.csv",
];

/// Configuration for a scan run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source URLs, fetched in order
    pub sources: Vec<String>,

    /// Query the lookup service; when false records carry an empty note
    pub enrich: bool,

    /// Per-source download timeout (seconds)
    /// Default: 8
    pub fetch_timeout_secs: u64,

    /// Lookup client, rate limit and retry settings
    pub lookup: LookupConfig,

    /// Artifact locations
    pub output: OutputConfig,

    /// Post-enrichment filters
    pub filters: Filters,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            enrich: true,
            fetch_timeout_secs: 8,
            lookup: LookupConfig::default(),
            output: OutputConfig::default(),
            filters: Filters::default(),
        }
    }
}

impl ScanConfig {
    /// Download timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ScanError::Config(
                "fetch_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.lookup
            .validate()
            .map_err(|e| ScanError::Config(format!("lookup: {}", e)))?;
        self.output
            .validate()
            .map_err(|e| ScanError::Config(format!("output: {}", e)))?;
        self.filters
            .validate()
            .map_err(|e| ScanError::Config(format!("filters: {}", e)))?;
        Ok(())
    }

    /// Load and validate configuration from TOML text
    pub fn from_toml(toml_str: &str) -> Result<Self, ScanError> {
        let config: ScanConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sources.len(), 3);
        assert!(config.enrich);
        assert_eq!(config.output.json_path(), PathBuf::from("data/bins.json"));
        assert_eq!(config.output.csv_path(), PathBuf::from("data/bins_enriched.csv"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            sources = ["http://localhost/a.csv"]
            enrich = false

            [lookup]
            rate_limit_per_sec = 4
            concurrency = 3

            [output]
            data_dir = "/tmp/binscan"

            [filters]
            only_country = "gb"
            prepaid_only = true
        "#;

        let config = ScanConfig::from_toml(toml).unwrap();
        assert_eq!(config.sources, vec!["http://localhost/a.csv"]);
        assert!(!config.enrich);
        assert_eq!(config.lookup.rate_limit_per_sec, 4);
        assert_eq!(config.lookup.concurrency, 3);
        assert_eq!(config.lookup.max_attempts, 3);
        assert_eq!(config.output.json_file, "bins.json");
        assert_eq!(config.filters.only_country.as_deref(), Some("gb"));
        assert!(config.filters.prepaid_only);
    }

    #[test]
    fn test_invalid_nested_values_rejected() {
        assert!(ScanConfig::from_toml("[lookup]\nmax_attempts = 0").is_err());
        assert!(ScanConfig::from_toml("[filters]\nonly_country = \"USA\"").is_err());
        assert!(ScanConfig::from_toml("[output]\ncsv_file = \"x\"\njson_file = \"x\"").is_err());
        assert!(ScanConfig::from_toml("fetch_timeout_secs = 0").is_err());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ScanConfig::from_toml("").unwrap(), ScanConfig::default());
    }
}
