//! Integration tests for the Binlist client against a local stand-in service

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Router,
};
use binscan_domain::traits::BinLookup;
use binscan_domain::{Attempt, Bin, Enrichment, LookupResponse};
use binscan_lookup::{BinlistClient, Enricher, LookupConfig, LookupError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct ServiceState {
    hits: Arc<Mutex<HashMap<String, usize>>>,
    versions: Arc<Mutex<Vec<String>>>,
}

async fn lookup(
    State(state): State<ServiceState>,
    Path(bin): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let hit = {
        let mut hits = state.hits.lock().unwrap();
        let count = hits.entry(bin.clone()).or_insert(0);
        *count += 1;
        *count
    };
    if let Some(version) = headers.get("accept-version").and_then(|v| v.to_str().ok()) {
        state.versions.lock().unwrap().push(version.to_string());
    }

    match (bin.as_str(), hit) {
        ("450000", 1) | ("450000", 2) => (StatusCode::TOO_MANY_REQUESTS, String::new()),
        ("450000", _) => (
            StatusCode::OK,
            r#"{"scheme":"visa","type":"credit","prepaid":true,"country":{"alpha2":"US","name":"United States of America (the)"},"bank":{"name":"Example Bank"}}"#
                .to_string(),
        ),
        ("400000", _) => (StatusCode::OK, "{}".to_string()),
        ("999999", _) => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        _ => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// Start the stand-in service and return its base URL
async fn spawn_service(state: ServiceState) -> String {
    let app = Router::new().route("/:bin", get(lookup)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_config(base_url: String) -> LookupConfig {
    LookupConfig {
        base_url,
        rate_limit_per_sec: 50,
        backoff_base_ms: 10,
        max_backoff_ms: 100,
        pacing_ms: 0,
        ..LookupConfig::default()
    }
}

fn bin(s: &str) -> Bin {
    Bin::parse(s).unwrap()
}

#[tokio::test]
async fn test_single_attempts_are_classified() {
    let state = ServiceState::default();
    let base_url = spawn_service(state.clone()).await;
    let client = BinlistClient::new(&test_config(base_url)).unwrap();

    assert_eq!(
        client.attempt(&bin("450000")).await,
        Attempt::Retryable(LookupError::RateLimited)
    );
    assert_eq!(
        client.attempt(&bin("400000")).await,
        Attempt::Success(LookupResponse::NoData)
    );
    assert!(matches!(
        client.attempt(&bin("999999")).await,
        Attempt::Terminal(LookupError::Status { code: 500, .. })
    ));
    assert!(matches!(
        client.attempt(&bin("411111")).await,
        Attempt::Terminal(LookupError::Status { code: 404, .. })
    ));

    let versions = state.versions.lock().unwrap().clone();
    assert_eq!(versions.len(), 4);
    assert!(versions.iter().all(|v| v == "3"));
}

#[tokio::test]
async fn test_enricher_recovers_from_rate_limiting() {
    let state = ServiceState::default();
    let base_url = spawn_service(state.clone()).await;
    let config = test_config(base_url);
    let enricher = Enricher::new(BinlistClient::new(&config).unwrap(), &config);

    let report = enricher.enrich(&bin("450000")).await;
    assert_eq!(report.attempts, 3);
    match report.enrichment {
        Enrichment::Enriched(details) => {
            assert_eq!(details.scheme(), Some("visa"));
            assert_eq!(details.card_type(), Some("credit"));
            assert_eq!(details.country_code(), Some("US"));
            assert!(details.is_prepaid());
        }
        other => panic!("Expected Enriched, got {:?}", other),
    }
    assert_eq!(state.hits.lock().unwrap()["450000"], 3);
}

#[tokio::test]
async fn test_enricher_server_error_is_terminal() {
    let state = ServiceState::default();
    let base_url = spawn_service(state.clone()).await;
    let config = test_config(base_url);
    let enricher = Enricher::new(BinlistClient::new(&config).unwrap(), &config);

    let report = enricher.enrich(&bin("999999")).await;
    assert_eq!(report.attempts, 1);
    assert_eq!(
        report.enrichment,
        Enrichment::Failed("HTTP 500: Internal Server Error".to_string())
    );
    assert_eq!(state.hits.lock().unwrap()["999999"], 1);
}
