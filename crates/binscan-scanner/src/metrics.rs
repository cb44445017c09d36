//! Metrics collected during a scan run

use binscan_domain::LookupNote;
use serde::Serialize;

/// Counters for one scan run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    /// Sources configured
    pub sources_total: usize,

    /// Sources fetched successfully
    pub sources_fetched: usize,

    /// Sources that could not be fetched
    pub sources_failed: usize,

    /// Sources scanned as raw text after the table parse gave nothing
    pub fallbacks_used: usize,

    /// Raw candidates seen across all sources, duplicates included
    pub candidates_seen: usize,

    /// Unique identifiers after normalization
    pub unique_bins: usize,

    /// Records noted `enriched_ok`
    pub enriched_ok: usize,

    /// Records noted `no_data`
    pub no_data: usize,

    /// Records noted `enrich_error`
    pub enrich_errors: usize,

    /// Records built without an enrichment attempt
    pub not_attempted: usize,

    /// Lookup calls issued
    pub total_attempts: u64,

    /// Lookup calls beyond the first per identifier
    pub retries: u64,

    /// Records left after filtering
    pub records_kept: usize,

    /// Wall-clock runtime in milliseconds
    pub runtime_ms: u64,
}

impl ScanMetrics {
    /// Create empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one source fetch outcome
    pub fn record_source(&mut self, fetched: bool) {
        if fetched {
            self.sources_fetched += 1;
        } else {
            self.sources_failed += 1;
        }
    }

    /// Record the final note of one identifier
    pub fn record_note(&mut self, note: &LookupNote) {
        match note {
            LookupNote::EnrichedOk => self.enriched_ok += 1,
            LookupNote::NoData => self.no_data += 1,
            LookupNote::EnrichError(_) => self.enrich_errors += 1,
            LookupNote::NotAttempted => self.not_attempted += 1,
        }
    }

    /// Record the lookup calls one identifier took
    pub fn record_attempts(&mut self, attempts: u32) {
        self.total_attempts += u64::from(attempts);
        self.retries += u64::from(attempts.saturating_sub(1));
    }

    /// Records that went through the lookup service
    pub fn total_enriched(&self) -> usize {
        self.enriched_ok + self.no_data + self.enrich_errors
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Scan Summary".to_string(),
            "============".to_string(),
            format!(
                "Sources: {} fetched, {} failed ({} raw-text fallbacks)",
                self.sources_fetched, self.sources_failed, self.fallbacks_used
            ),
            format!("Candidates seen: {}", self.candidates_seen),
            format!("Unique BINs: {}", self.unique_bins),
        ];

        if self.total_enriched() > 0 {
            lines.push(format!(
                "Lookups: {} calls ({} retries)",
                self.total_attempts, self.retries
            ));
            lines.push(format!("  enriched_ok: {}", self.enriched_ok));
            lines.push(format!("  no_data: {}", self.no_data));
            lines.push(format!("  enrich_error: {}", self.enrich_errors));
        }

        lines.push(format!("Records written: {}", self.records_kept));
        lines.push(format!("Runtime: {}ms", self.runtime_ms));
        lines.join("\n")
    }
}
