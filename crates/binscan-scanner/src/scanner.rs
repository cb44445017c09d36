//! Scan run orchestration

use crate::{Filters, ScanConfig, ScanError, ScanMetrics};
use binscan_domain::traits::{BinLookup, RecordSink, SourceFetcher};
use binscan_domain::{Bin, Enrichment, Record, RunResult};
use binscan_extractor::{extract_from_source, CandidatePool};
use binscan_lookup::Enricher;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Note cause for an identifier whose worker task died
const WORKER_FAILED: &str = "worker task failed";

/// Records and metrics of one finished run
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Filtered records, ascending by bin
    pub result: RunResult,
    /// Counters collected during the run
    pub metrics: ScanMetrics,
}

/// Runs the fetch, extract, enrich and filter pipeline
///
/// Per-source and per-identifier failures never abort a run; they end up in
/// the metrics and in the records' notes.
pub struct Scanner<F, L> {
    fetcher: F,
    enricher: Arc<Enricher<L>>,
    sources: Vec<String>,
    enrich: bool,
    concurrency: usize,
}

impl<F, L> Scanner<F, L>
where
    F: SourceFetcher,
    L: BinLookup + 'static,
{
    /// Create a scanner around a ready enricher
    pub fn new(fetcher: F, enricher: Enricher<L>, config: &ScanConfig) -> Self {
        Self {
            fetcher,
            enricher: Arc::new(enricher),
            sources: config.sources.clone(),
            enrich: config.enrich,
            concurrency: config.lookup.concurrency.max(1),
        }
    }

    /// Create a scanner whose enricher is built from the lookup settings
    pub fn from_config(fetcher: F, lookup: L, config: &ScanConfig) -> Self {
        Self::new(fetcher, Enricher::new(lookup, &config.lookup), config)
    }

    /// Configured source URLs
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// The enrichment client
    pub fn enricher(&self) -> &Enricher<L> {
        &self.enricher
    }

    /// Execute one full run
    pub async fn run(&self, filters: &Filters) -> ScanOutcome {
        let start = Instant::now();
        let mut metrics = ScanMetrics::new();
        info!("Starting scan of {} sources", self.sources.len());

        let bins = self.collect_bins(&mut metrics).await;
        info!(
            "Found {} unique BINs in {} candidates",
            bins.len(),
            metrics.candidates_seen
        );

        let records = if !self.enrich {
            debug!("Enrichment disabled, building bare records");
            bins.into_iter()
                .map(|bin| Record::from_enrichment(bin, Enrichment::Skipped))
                .collect()
        } else if self.concurrency == 1 {
            self.enrich_sequential(bins, &mut metrics).await
        } else {
            self.enrich_pooled(bins, &mut metrics).await
        };

        for record in &records {
            metrics.record_note(record.note());
        }

        let records = if filters.is_empty() {
            records
        } else {
            let before = records.len();
            let kept = filters.apply(records);
            info!("Filters kept {} of {} records", kept.len(), before);
            kept
        };

        let result = RunResult::new(records);
        metrics.records_kept = result.len();
        metrics.runtime_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scan complete: {} records ({} enriched, {} no data, {} errors)",
            result.len(),
            metrics.enriched_ok,
            metrics.no_data,
            metrics.enrich_errors
        );

        ScanOutcome { result, metrics }
    }

    /// Fetch every source and reduce all candidates to the sorted unique set
    pub async fn collect_bins(&self, metrics: &mut ScanMetrics) -> Vec<Bin> {
        let mut pool = CandidatePool::new();
        metrics.sources_total = self.sources.len();

        for url in &self.sources {
            let text = match self.fetcher.fetch(url).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping source {}: {}", url, e);
                    metrics.record_source(false);
                    continue;
                }
            };
            metrics.record_source(true);

            let extraction = extract_from_source(&text);
            if extraction.used_fallback {
                metrics.fallbacks_used += 1;
            }
            debug!(
                "Source {} yielded {} candidates",
                url,
                extraction.candidates.len()
            );
            pool.extend(extraction.candidates);
        }

        metrics.candidates_seen = pool.candidates_seen();
        metrics.unique_bins = pool.len();
        pool.into_bins()
    }

    async fn enrich_sequential(&self, bins: Vec<Bin>, metrics: &mut ScanMetrics) -> Vec<Record> {
        let total = bins.len();
        let mut records = Vec::with_capacity(total);

        for (idx, bin) in bins.into_iter().enumerate() {
            let report = self.enricher.enrich(&bin).await;
            metrics.record_attempts(report.attempts);

            let record = Record::from_enrichment(bin, report.enrichment);
            info!("[{}/{}] BIN {} -> {}", idx + 1, total, record.bin(), record.note());
            records.push(record);
        }

        records
    }

    async fn enrich_pooled(&self, bins: Vec<Bin>, metrics: &mut ScanMetrics) -> Vec<Record> {
        let total = bins.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        debug!("Enriching {} BINs with {} workers", total, self.concurrency);

        for bin in bins.iter().cloned() {
            let enricher = Arc::clone(&self.enricher);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let report = enricher.enrich(&bin).await;
                (bin, report)
            });
        }

        let mut settled = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((bin, report)) => {
                    metrics.record_attempts(report.attempts);
                    let record = Record::from_enrichment(bin.clone(), report.enrichment);
                    info!(
                        "[{}/{}] BIN {} -> {}",
                        settled.len() + 1,
                        total,
                        record.bin(),
                        record.note()
                    );
                    settled.insert(bin, record);
                }
                Err(e) => warn!("Enrichment worker failed: {}", e),
            }
        }

        bins.into_iter()
            .map(|bin| match settled.remove(&bin) {
                Some(record) => record,
                None => {
                    Record::from_enrichment(bin, Enrichment::Failed(WORKER_FAILED.to_string()))
                }
            })
            .collect()
    }
}

/// Run the pipeline and persist the result
///
/// The sink is the only fatal point of a run: if it cannot write, the error
/// is returned and no artifact is assumed to exist.
pub async fn run_to_sink<F, L, S>(
    scanner: &Scanner<F, L>,
    filters: &Filters,
    sink: &S,
) -> Result<ScanOutcome, ScanError>
where
    F: SourceFetcher,
    L: BinLookup + 'static,
    S: RecordSink,
{
    let outcome = scanner.run(filters).await;
    sink.persist(&outcome.result)
        .map_err(|e| ScanError::Sink(e.to_string()))?;
    info!("Persisted {} records", outcome.result.len());
    Ok(outcome)
}
