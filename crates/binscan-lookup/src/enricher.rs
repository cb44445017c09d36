//! Rate-limited, retrying enrichment client
//!
//! One [`Enricher`] serves a whole run. Every attempt takes a permit from the
//! shared [`RateLimiter`] and is followed by a fixed pacing pause. Retryable
//! failures back off exponentially without holding a permit; the identifier
//! always ends with exactly one [`Enrichment`].

use crate::{LookupConfig, LookupError, RateLimiter, RetryPolicy};
use binscan_domain::traits::BinLookup;
use binscan_domain::{Attempt, Bin, Enrichment};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Final outcome for one identifier plus the number of calls it took
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichReport {
    /// Final enrichment outcome
    pub enrichment: Enrichment,
    /// Lookup calls issued, 0 if cancelled before the first
    pub attempts: u32,
}

impl EnrichReport {
    fn failed(cause: impl Into<String>, attempts: u32) -> Self {
        Self {
            enrichment: Enrichment::Failed(cause.into()),
            attempts,
        }
    }
}

/// Cooperative cancellation signal for a run
///
/// Cancelling makes every identifier that has not settled yet finish with
/// `enrich_error: cancelled`, either before its next call or at its next
/// backoff checkpoint.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Create a handle in the not-cancelled state
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Enrichment client wrapping a lookup transport
pub struct Enricher<L> {
    lookup: L,
    limiter: Arc<RateLimiter>,
    policy: RetryPolicy,
    pacing: Duration,
    cancel: Option<watch::Receiver<bool>>,
}

impl<L: BinLookup> Enricher<L> {
    /// Create an enricher with its own rate limiter
    pub fn new(lookup: L, config: &LookupConfig) -> Self {
        Self {
            lookup,
            limiter: Arc::new(RateLimiter::per_second(config.rate_limit_per_sec)),
            policy: RetryPolicy::from_config(config),
            pacing: config.pacing(),
            cancel: None,
        }
    }

    /// Share an existing rate limiter instead of the enricher's own
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Observe a cancellation handle
    pub fn with_cancel(mut self, cancel: &CancelHandle) -> Self {
        self.cancel = Some(cancel.subscribe());
        self
    }

    /// The underlying transport
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// The retry policy in use
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Enrich one identifier
    ///
    /// Never fails: terminal errors, exhausted retries and cancellation all
    /// come back as [`Enrichment::Failed`].
    pub async fn enrich(&self, bin: &Bin) -> EnrichReport {
        let mut attempts = 0;

        loop {
            if self.is_cancelled() {
                return EnrichReport::failed(LookupError::Cancelled.to_string(), attempts);
            }

            self.limiter.acquire().await;
            attempts += 1;
            let attempt = self.lookup.attempt(bin).await;
            self.pace().await;

            match attempt {
                Attempt::Success(response) => {
                    return EnrichReport {
                        enrichment: response.into(),
                        attempts,
                    };
                }
                Attempt::Terminal(e) => {
                    debug!("BIN {} failed permanently: {}", bin, e);
                    return EnrichReport::failed(e.to_string(), attempts);
                }
                Attempt::Retryable(e) => {
                    if !self.policy.allows_retry_after(attempts) {
                        warn!("BIN {} gave up after {} attempts: {}", bin, attempts, e);
                        return EnrichReport::failed(
                            format!("{} (gave up after {} attempts)", e, attempts),
                            attempts,
                        );
                    }

                    let delay = self.policy.delay_for(attempts);
                    debug!(
                        "BIN {} attempt {}/{} failed ({}), retrying in {:?}",
                        bin,
                        attempts,
                        self.policy.max_attempts(),
                        e,
                        delay
                    );
                    if !self.backoff(delay).await {
                        return EnrichReport::failed(LookupError::Cancelled.to_string(), attempts);
                    }
                }
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    async fn pace(&self) {
        if !self.pacing.is_zero() {
            sleep(self.pacing).await;
        }
    }

    /// Sleep for `delay`; false if cancelled meanwhile
    async fn backoff(&self, delay: Duration) -> bool {
        let Some(receiver) = &self.cancel else {
            sleep(delay).await;
            return true;
        };

        let mut receiver = receiver.clone();
        let cancelled = async move {
            let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
            if closed {
                // Handle dropped, cancellation can no longer happen
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = sleep(delay) => true,
            _ = cancelled => false,
        }
    }
}
