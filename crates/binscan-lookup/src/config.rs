//! Configuration for the lookup client

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default lookup service base URL
pub const DEFAULT_BASE_URL: &str = "https://lookup.binlist.net";

/// Configuration for the lookup client, rate limiter and retry policy
///
/// # Examples
///
/// ```
/// use binscan_lookup::LookupConfig;
///
/// let config = LookupConfig::default();
/// assert_eq!(config.rate_limit_per_sec, 2);
/// assert_eq!(config.max_attempts, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Service base URL; the bin is appended as the last path segment
    pub base_url: String,

    /// Value of the `Accept-Version` header
    pub accept_version: String,

    /// Per-request timeout (seconds)
    /// Default: 8
    pub timeout_secs: u64,

    /// Global ceiling on calls per second, shared by all workers
    /// Default: 2
    pub rate_limit_per_sec: u32,

    /// Attempts per identifier, first call included
    /// Default: 3
    pub max_attempts: u32,

    /// Delay before the first retry (milliseconds)
    /// Default: 2000
    pub backoff_base_ms: u64,

    /// Growth factor between consecutive retry delays
    /// Default: 2.0 (doubling)
    pub backoff_multiplier: f64,

    /// Upper bound on a single retry delay (milliseconds)
    /// Default: 30000
    pub max_backoff_ms: u64,

    /// Fixed pause after every attempt (milliseconds)
    /// Default: 200
    pub pacing_ms: u64,

    /// Identifiers enriched concurrently; 1 means strictly sequential
    /// Default: 1
    pub concurrency: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            accept_version: "3".to_string(),
            timeout_secs: 8,
            rate_limit_per_sec: 2,
            max_attempts: 3,
            backoff_base_ms: 2000,
            backoff_multiplier: 2.0,
            max_backoff_ms: 30_000,
            pacing_ms: 200,
            concurrency: 1,
        }
    }
}

impl LookupConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pacing delay as a Duration
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.rate_limit_per_sec == 0 {
            return Err("rate_limit_per_sec must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.backoff_multiplier.is_nan() || self.backoff_multiplier < 1.0 {
            return Err("backoff_multiplier must be at least 1.0".to_string());
        }
        if self.max_backoff_ms < self.backoff_base_ms {
            return Err("max_backoff_ms cannot be less than backoff_base_ms".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LookupConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let mut config = LookupConfig::default();
        config.rate_limit_per_sec = 0;
        assert!(config.validate().is_err());

        let mut config = LookupConfig::default();
        config.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = LookupConfig::default();
        config.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());

        let mut config = LookupConfig::default();
        config.backoff_multiplier = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = LookupConfig::default();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LookupConfig = toml::from_str("rate_limit_per_sec = 5").unwrap();
        assert_eq!(config.rate_limit_per_sec, 5);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
