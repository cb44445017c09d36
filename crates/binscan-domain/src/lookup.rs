//! Lookup outcomes
//!
//! [`Attempt`] is what a single call to the lookup service produces; the retry
//! loop inspects it to decide whether to try again. [`Enrichment`] is the final
//! per-identifier outcome once retries are settled.

use crate::BinDetails;

/// A successful answer from the lookup service
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    /// The service returned a payload
    Found(BinDetails),
    /// The service answered but has nothing for this identifier
    NoData,
}

/// Outcome of one lookup attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt<E> {
    /// The call completed and was understood
    Success(LookupResponse),
    /// Transient failure (rate limited, network, timeout); may be retried
    Retryable(E),
    /// Definitive failure; retrying will not help
    Terminal(E),
}

impl<E> Attempt<E> {
    /// True for [`Attempt::Retryable`]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Attempt::Retryable(_))
    }
}

/// Final enrichment outcome for one identifier
#[derive(Debug, Clone, PartialEq)]
pub enum Enrichment {
    /// Payload obtained
    Enriched(BinDetails),
    /// The service has no data for this identifier
    NoData,
    /// Terminal error or exhausted retries, with the cause
    Failed(String),
    /// Enrichment was not attempted
    Skipped,
}

impl Enrichment {
    /// True for [`Enrichment::Failed`]
    pub fn is_failure(&self) -> bool {
        matches!(self, Enrichment::Failed(_))
    }
}

impl From<LookupResponse> for Enrichment {
    fn from(response: LookupResponse) -> Self {
        match response {
            LookupResponse::Found(details) => Enrichment::Enriched(details),
            LookupResponse::NoData => Enrichment::NoData,
        }
    }
}
