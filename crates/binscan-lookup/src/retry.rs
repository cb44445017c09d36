//! Retry policy with exponential backoff

use crate::LookupConfig;
use std::time::Duration;

/// Bounded exponential backoff
///
/// Delays grow as `base * multiplier^(n-1)` for the n-th retry and are capped
/// at `max_delay`. There is no jitter, so a given sequence of failures always
/// produces the same timing.
///
/// # Examples
///
/// ```
/// use binscan_lookup::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(2), 2.0, Duration::from_secs(30));
/// assert_eq!(policy.delay_for(1), Duration::from_secs(2));
/// assert_eq!(policy.delay_for(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is clamped to at least 1
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            multiplier: multiplier.max(1.0),
            max_delay,
        }
    }

    /// Build the policy described by a lookup configuration
    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.backoff_base_ms),
            config.backoff_multiplier,
            Duration::from_millis(config.max_backoff_ms),
        )
    }

    /// Attempts allowed per identifier, first call included
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether another attempt may follow attempt number `attempt` (1-based)
    pub fn allows_retry_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay before the `retry`-th retry (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.base_delay.as_secs_f64() * self.multiplier.powi(exponent);
        if !secs.is_finite() || secs >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(secs)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&LookupConfig::default())
    }
}
