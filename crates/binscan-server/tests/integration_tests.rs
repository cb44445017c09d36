//! Integration tests for the artifact server

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use binscan_domain::RunResult;
use binscan_lookup::{MockLookup, MockReply};
use binscan_scanner::{run_to_sink, Filters, OutputConfig, ScanConfig, Scanner, StaticFetcher};
use binscan_server::{
    config::ServerConfig,
    handlers::{create_router, AppState, HealthCheckResponse},
    prepare_state,
    trigger::ScanTrigger,
    ScanStatus,
};
use binscan_store::FileSink;
use binscan_domain::traits::RecordSink;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

fn scan_config(dir: &TempDir) -> ScanConfig {
    let mut config = ScanConfig::default();
    config.sources = vec!["mem://bins.csv".to_string()];
    config.lookup.rate_limit_per_sec = 100;
    config.lookup.pacing_ms = 0;
    config.output = OutputConfig::in_dir(dir.path());
    config
}

/// Helper to create state whose scan runs against in-memory collaborators
fn create_test_state(dir: &TempDir) -> AppState {
    let config = scan_config(dir);
    let fetcher = StaticFetcher::new().with_source("mem://bins.csv", "bin\n411111\n450000\n411111\n");
    let scanner = Scanner::from_config(fetcher, MockLookup::new(MockReply::NoData), &config);
    let sink = FileSink::new(config.output.clone());

    let trigger = ScanTrigger::new(async move {
        run_to_sink(&scanner, &Filters::none(), &sink)
            .await
            .map(|outcome| outcome.result.len())
            .map_err(|e| e.to_string())
    });

    AppState {
        trigger: Arc::new(trigger),
        sink: Arc::new(FileSink::new(config.output)),
        cache_max_age_secs: 600,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, header::HeaderMap, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_missing_artifact_triggers_single_scan_then_serves() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let app = create_router(state.clone());

    let (status, _, body) = get(&app, "/api/bins").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
    assert_eq!(body["status"]["state"], "running");

    // A second request while running does not start another scan
    let (status, _, _) = get(&app, "/api/bins").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!state.trigger.ensure_started());

    assert_eq!(
        state.trigger.wait_finished().await,
        ScanStatus::Completed { records: 2 }
    );

    let (status, headers, body) = get(&app, "/api/bins").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=600");
    let bins: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["bin"].as_str().unwrap())
        .collect();
    assert_eq!(bins, vec!["411111", "450000"]);
    assert_eq!(body[0]["note"], "no_data");

    let (_, _, status_body) = get(&app, "/api/scan/status").await;
    assert_eq!(status_body, serde_json::json!({"state": "completed", "records": 2}));
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    let app = create_router(state.clone());

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthCheckResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.artifact_present);

    state.sink.persist(&RunResult::default()).unwrap();

    let (_, _, body) = get(&app, "/health").await;
    assert_eq!(body["artifact_present"], true);
}

#[tokio::test]
async fn test_existing_artifact_is_served_without_scanning() {
    let dir = TempDir::new().unwrap();
    let state = create_test_state(&dir);
    state.sink.persist(&RunResult::default()).unwrap();
    let app = create_router(state.clone());

    let (status, _, body) = get(&app, "/api/bins").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
    assert_eq!(state.trigger.status(), ScanStatus::Idle);
}

#[tokio::test]
async fn test_prepare_state_starts_scan_when_artifact_missing() {
    let dir = TempDir::new().unwrap();
    let mut config = ServerConfig::default();
    config.scan = scan_config(&dir);
    config.scan.sources.clear();

    let state = prepare_state(&config).unwrap();
    assert_ne!(state.trigger.status(), ScanStatus::Idle);
    assert_eq!(
        state.trigger.wait_finished().await,
        ScanStatus::Completed { records: 0 }
    );
    assert!(state.sink.artifact_present());
}

#[tokio::test]
async fn test_prepare_state_keeps_existing_artifact() {
    let dir = TempDir::new().unwrap();
    let mut config = ServerConfig::default();
    config.scan = scan_config(&dir);
    FileSink::new(config.scan.output.clone())
        .persist(&RunResult::default())
        .unwrap();

    let state = prepare_state(&config).unwrap();
    assert_eq!(state.trigger.status(), ScanStatus::Idle);
}
