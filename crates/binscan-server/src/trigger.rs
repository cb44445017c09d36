//! Single background scan run
//!
//! The [`ScanTrigger`] owns at most one scan job for the lifetime of the
//! server. The job starts on the first [`ensure_started`](ScanTrigger::ensure_started)
//! call and its progress is published on a watch channel.

use binscan_lookup::BinlistClient;
use binscan_scanner::{run_to_sink, HttpFetcher, ScanConfig, Scanner};
use binscan_store::FileSink;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Boxed scan job resolving to the number of records written
pub type ScanJob = Pin<Box<dyn Future<Output = Result<usize, String>> + Send>>;

/// Progress of the background scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScanStatus {
    /// Not started
    Idle,
    /// In progress
    Running,
    /// Finished and persisted
    Completed {
        /// Records written
        records: usize,
    },
    /// Finished without an artifact
    Failed {
        /// Failure cause
        error: String,
    },
}

impl ScanStatus {
    /// True once the job has completed or failed
    pub fn is_finished(&self) -> bool {
        matches!(self, ScanStatus::Completed { .. } | ScanStatus::Failed { .. })
    }
}

/// Starts the scan job at most once and reports its status
pub struct ScanTrigger {
    status: Arc<watch::Sender<ScanStatus>>,
    job: Mutex<Option<ScanJob>>,
}

impl ScanTrigger {
    /// Wrap a job; nothing runs until [`ensure_started`](Self::ensure_started)
    pub fn new<F>(job: F) -> Self
    where
        F: Future<Output = Result<usize, String>> + Send + 'static,
    {
        let (status, _) = watch::channel(ScanStatus::Idle);
        Self {
            status: Arc::new(status),
            job: Mutex::new(Some(Box::pin(job))),
        }
    }

    /// Trigger running the full pipeline described by `config`
    ///
    /// Sources are fetched over HTTP, identifiers are enriched against the
    /// configured lookup service, and both artifacts go to `config.output`.
    pub fn for_scan(config: &ScanConfig) -> Result<Self, String> {
        let fetcher = HttpFetcher::new(config.fetch_timeout()).map_err(|e| e.to_string())?;
        let client = BinlistClient::new(&config.lookup).map_err(|e| e.to_string())?;
        let scanner = Scanner::from_config(fetcher, client, config);
        let sink = FileSink::new(config.output.clone());
        let filters = config.filters.clone();

        Ok(Self::new(async move {
            let outcome = run_to_sink(&scanner, &filters, &sink)
                .await
                .map_err(|e| e.to_string())?;
            Ok(outcome.result.len())
        }))
    }

    /// Start the job if it has never been started
    ///
    /// Returns true only for the call that actually started it. Must be
    /// called from within a Tokio runtime.
    pub fn ensure_started(&self) -> bool {
        let started = self.status.send_if_modified(|status| {
            if *status == ScanStatus::Idle {
                *status = ScanStatus::Running;
                true
            } else {
                false
            }
        });
        if !started {
            return false;
        }

        let job = match self.job.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(job) = job else {
            self.status.send_replace(ScanStatus::Failed {
                error: "scan job unavailable".to_string(),
            });
            return false;
        };

        info!("Starting background scan");
        let status = Arc::clone(&self.status);
        tokio::spawn(async move {
            let finished = match tokio::spawn(job).await {
                Ok(Ok(records)) => {
                    info!("Background scan completed with {} records", records);
                    ScanStatus::Completed { records }
                }
                Ok(Err(e)) => {
                    error!("Background scan failed: {}", e);
                    ScanStatus::Failed { error: e }
                }
                Err(e) => {
                    warn!("Background scan task aborted: {}", e);
                    ScanStatus::Failed {
                        error: format!("scan task aborted: {}", e),
                    }
                }
            };
            status.send_replace(finished);
        });
        true
    }

    /// Current status
    pub fn status(&self) -> ScanStatus {
        self.status.borrow().clone()
    }

    /// Receiver for status changes
    pub fn subscribe(&self) -> watch::Receiver<ScanStatus> {
        self.status.subscribe()
    }

    /// Wait until the job has completed or failed
    ///
    /// Never resolves if the job was not started.
    pub async fn wait_finished(&self) -> ScanStatus {
        let mut receiver = self.subscribe();
        let finished = receiver
            .wait_for(ScanStatus::is_finished)
            .await
            .map(|status| status.clone());
        match finished {
            Ok(status) => status,
            Err(_) => self.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_starts_exactly_once() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let trigger = ScanTrigger::new(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        });
        assert_eq!(trigger.status(), ScanStatus::Idle);

        assert!(trigger.ensure_started());
        assert_eq!(trigger.status(), ScanStatus::Running);
        assert!(!trigger.ensure_started());

        assert_eq!(trigger.wait_finished().await, ScanStatus::Completed { records: 7 });
        assert!(!trigger.ensure_started());
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_reported() {
        let trigger = ScanTrigger::new(async { Err("Sink error: disk full".to_string()) });
        trigger.ensure_started();

        assert_eq!(
            trigger.wait_finished().await,
            ScanStatus::Failed {
                error: "Sink error: disk full".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_panicking_job_is_reported_as_failed() {
        let trigger = ScanTrigger::new(async {
            if true {
                panic!("boom");
            }
            Ok(0)
        });
        trigger.ensure_started();

        assert!(matches!(trigger.wait_finished().await, ScanStatus::Failed { .. }));
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_value(ScanStatus::Completed { records: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "completed", "records": 3}));

        let json = serde_json::to_value(ScanStatus::Idle).unwrap();
        assert_eq!(json, serde_json::json!({"state": "idle"}));
    }

    #[tokio::test]
    async fn test_for_scan_builds_from_default_config() {
        assert!(ScanTrigger::for_scan(&ScanConfig::default()).is_ok());
    }
}
