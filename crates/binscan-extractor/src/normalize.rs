//! Normalization and deduplication of candidates

use binscan_domain::{Bin, BIN_MAX_LEN, BIN_MIN_LEN};
use std::collections::BTreeSet;

/// Normalize one candidate into a [`Bin`]
///
/// Non-digits are removed. Eight or more digits keep the first 8, anything
/// shorter keeps the first 6. Returns `None` if fewer than 6 digits remain.
pub fn normalize(candidate: &str) -> Option<Bin> {
    let digits: String = candidate.chars().filter(|c| c.is_ascii_digit()).collect();
    let keep = if digits.len() >= BIN_MAX_LEN {
        BIN_MAX_LEN
    } else {
        BIN_MIN_LEN
    };
    let truncated: String = digits.chars().take(keep).collect();
    Bin::parse(truncated).ok()
}

/// Normalize, deduplicate and sort a batch of candidates
pub fn unique_bins<I, S>(candidates: I) -> Vec<Bin>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pool = CandidatePool::new();
    pool.extend(candidates);
    pool.into_bins()
}

/// Accumulates candidates across sources into one unique bin set
///
/// The resulting set does not depend on the order sources are added in, or on
/// a source being added more than once.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    bins: BTreeSet<Bin>,
    candidates_seen: usize,
}

impl CandidatePool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add candidates
    pub fn extend<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for candidate in candidates {
            self.candidates_seen += 1;
            if let Some(bin) = normalize(candidate.as_ref()) {
                self.bins.insert(bin);
            }
        }
    }

    /// Total candidates fed in, duplicates included
    pub fn candidates_seen(&self) -> usize {
        self.candidates_seen
    }

    /// Number of unique bins so far
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when no bin has been collected
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The unique bins in ascending order
    pub fn into_bins(self) -> Vec<Bin> {
        self.bins.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lengths() {
        assert_eq!(normalize("411111").unwrap().as_str(), "411111");
        // Seven digits keep only the first six
        assert_eq!(normalize("4111112").unwrap().as_str(), "411111");
        assert_eq!(normalize("41111122").unwrap().as_str(), "41111122");
        assert_eq!(normalize("4111112233").unwrap().as_str(), "41111122");
    }

    #[test]
    fn test_normalize_strips_non_digits() {
        assert_eq!(normalize("4111-11").unwrap().as_str(), "411111");
        assert_eq!(normalize(" 4111 1122 ").unwrap().as_str(), "41111122");
    }

    #[test]
    fn test_normalize_too_short() {
        assert!(normalize("12345").is_none());
        assert!(normalize("abc").is_none());
    }

    #[test]
    fn test_unique_bins_sorted_and_deduped() {
        let bins = unique_bins(["51234567", "400000", "4000001", "400000"]);
        let bins: Vec<&str> = bins.iter().map(Bin::as_str).collect();
        // "4000001" normalizes to "400000"
        assert_eq!(bins, vec!["400000", "51234567"]);
    }

    #[test]
    fn test_pool_counts() {
        let mut pool = CandidatePool::new();
        pool.extend(["400000", "400000"]);
        pool.extend(vec!["411111".to_string()]);
        assert_eq!(pool.candidates_seen(), 3);
        assert_eq!(pool.len(), 2);
    }
}
