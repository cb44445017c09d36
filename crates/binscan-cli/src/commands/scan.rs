//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::config::apply_scan_args;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use binscan_lookup::{BinlistClient, CancelHandle, Enricher};
use binscan_scanner::{run_to_sink, HttpFetcher, ScanConfig, ScanOutcome, Scanner};
use binscan_store::FileSink;
use tracing::warn;

/// Execute the scan command.
///
/// Ctrl+C cancels the run: identifiers not yet settled are recorded as
/// `enrich_error: cancelled` and both artifacts are still written.
pub async fn execute_scan(
    args: &ScanArgs,
    mut config: ScanConfig,
    formatter: &Formatter,
) -> Result<ScanOutcome> {
    apply_scan_args(&mut config, args)?;

    let fetcher =
        HttpFetcher::new(config.fetch_timeout()).map_err(|e| CliError::Config(e.to_string()))?;
    let client = BinlistClient::new(&config.lookup)?;

    let cancel = CancelHandle::new();
    let enricher = Enricher::new(client, &config.lookup).with_cancel(&cancel);
    let scanner = Scanner::new(fetcher, enricher, &config);
    let sink = FileSink::new(config.output.clone());

    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, remaining BINs will be marked as cancelled");
                cancel.cancel();
            }
        })
    };

    let result = run_to_sink(&scanner, &config.filters, &sink).await;
    interrupt.abort();
    let outcome = result?;

    println!("{}", formatter.format_scan(&outcome, &config.output)?);
    Ok(outcome)
}
