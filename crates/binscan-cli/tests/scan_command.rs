//! Scan command end to end, without network sources

use binscan_cli::cli::ScanArgs;
use binscan_cli::commands::execute_scan;
use binscan_cli::config::OutputFormat;
use binscan_cli::{CliError, Formatter};
use binscan_scanner::ScanConfig;
use tempfile::TempDir;

fn offline_config() -> ScanConfig {
    let mut config = ScanConfig::default();
    config.sources.clear();
    config
}

#[tokio::test]
async fn test_scan_writes_artifacts_to_data_dir() {
    let dir = TempDir::new().unwrap();
    let args = ScanArgs {
        data_dir: Some(dir.path().join("out")),
        ..ScanArgs::default()
    };
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    let outcome = execute_scan(&args, offline_config(), &formatter).await.unwrap();

    assert!(outcome.result.is_empty());
    assert_eq!(outcome.metrics.sources_total, 0);
    let json = std::fs::read_to_string(dir.path().join("out/bins.json")).unwrap();
    assert_eq!(json.trim(), "[]");
    let csv = std::fs::read_to_string(dir.path().join("out/bins_enriched.csv")).unwrap();
    assert!(csv.starts_with("bin,scheme,type,brand,prepaid,"));
}

#[tokio::test]
async fn test_scan_rejects_bad_country() {
    let args = ScanArgs {
        only_country: Some("United States".to_string()),
        ..ScanArgs::default()
    };
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    let err = execute_scan(&args, offline_config(), &formatter)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn test_unwritable_data_dir_fails_the_scan() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let args = ScanArgs {
        data_dir: Some(blocker.join("out")),
        ..ScanArgs::default()
    };
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    let err = execute_scan(&args, offline_config(), &formatter)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Scan(_)));
    assert!(err.to_string().starts_with("Sink error:"));
}
