//! HTTP request handlers for the artifact server.
//!
//! Serves the JSON artifact, reports the background scan status and a health
//! check using axum.

use crate::trigger::{ScanStatus, ScanTrigger};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use binscan_store::FileSink;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Background scan owner
    pub trigger: Arc<ScanTrigger>,
    /// Artifact reader
    pub sink: Arc<FileSink>,
    /// `max-age` for served artifacts, in seconds
    pub cache_max_age_secs: u64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the server answers
    pub status: String,
    /// Whether the JSON artifact exists
    pub artifact_present: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Background scan status, when relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScanStatus>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// No artifact yet; carries the scan status
    NotReady(ScanStatus),
    /// Artifact exists but cannot be served
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotReady(scan) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: not_ready_message(&scan),
                    status: Some(scan),
                },
            ),
            AppError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: msg,
                    status: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

fn not_ready_message(scan: &ScanStatus) -> String {
    match scan {
        ScanStatus::Failed { error } => format!("bins.json not found; scan failed: {}", error),
        ScanStatus::Completed { .. } => "bins.json not found after scan completed".to_string(),
        ScanStatus::Idle | ScanStatus::Running => {
            "bins.json not found; scan started in background".to_string()
        }
    }
}

/// GET /api/bins - Serve the JSON artifact
///
/// Starts the background scan when the artifact is missing.
async fn get_bins(State(state): State<AppState>) -> Result<Response, AppError> {
    let sink = Arc::clone(&state.sink);
    let artifact = tokio::task::spawn_blocking(move || sink.read_artifact())
        .await
        .map_err(|e| {
            error!("Artifact read task failed: {}", e);
            AppError::InternalError(format!("artifact read failed: {}", e))
        })?;

    match artifact {
        Ok(Some(body)) => {
            let cache_control = format!("public, max-age={}", state.cache_max_age_secs);
            Ok((
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                body,
            )
                .into_response())
        }
        Ok(None) => {
            if state.trigger.ensure_started() {
                info!("Artifact requested before first scan, scan started");
            }
            Err(AppError::NotReady(state.trigger.status()))
        }
        Err(e) => {
            error!("Cannot serve artifact: {}", e);
            Err(AppError::InternalError(format!("invalid artifact: {}", e)))
        }
    }
}

/// GET /api/scan/status - Background scan status
async fn scan_status(State(state): State<AppState>) -> Json<ScanStatus> {
    Json(state.trigger.status())
}

/// GET /health - Liveness and artifact presence
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        artifact_present: state.sink.artifact_present(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/bins", get(get_bins))
        .route("/api/scan/status", get(scan_status))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use binscan_store::OutputConfig;
    use tempfile::TempDir;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(dir: &TempDir) -> AppState {
        AppState {
            trigger: Arc::new(ScanTrigger::new(async { Ok(0) })),
            sink: Arc::new(FileSink::new(OutputConfig::in_dir(dir.path()))),
            cache_max_age_secs: 120,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&dir));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_scan_status_starts_idle() {
        let dir = TempDir::new().unwrap();
        let app = create_router(create_test_state(&dir));

        let request = Request::builder()
            .uri("/api/scan/status")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"state":"idle"}"#);
    }

    async fn error_message(app: AxumRouter) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri("/api/bins")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_missing_artifact_reports_running_scan() {
        let dir = TempDir::new().unwrap();
        let mut state = create_test_state(&dir);
        state.trigger = Arc::new(ScanTrigger::new(std::future::pending()));

        let (status, body) = error_message(create_router(state)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "bins.json not found; scan started in background");
        assert_eq!(body["status"]["state"], "running");
    }

    #[tokio::test]
    async fn test_missing_artifact_after_failed_scan() {
        let dir = TempDir::new().unwrap();
        let mut state = create_test_state(&dir);
        state.trigger = Arc::new(ScanTrigger::new(async {
            Err("Sink error: disk full".to_string())
        }));
        state.trigger.ensure_started();
        state.trigger.wait_finished().await;

        let (status, body) = error_message(create_router(state)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "bins.json not found; scan failed: Sink error: disk full"
        );
        assert_eq!(body["status"]["state"], "failed");
    }

    #[tokio::test]
    async fn test_missing_artifact_after_completed_scan() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir);
        state.trigger.ensure_started();
        state.trigger.wait_finished().await;

        let (status, body) = error_message(create_router(state)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "bins.json not found after scan completed");
        assert_eq!(body["status"]["records"], 0);
    }

    #[tokio::test]
    async fn test_corrupt_artifact_is_server_error() {
        let dir = TempDir::new().unwrap();
        let state = create_test_state(&dir);
        std::fs::write(state.sink.config().json_path(), "{not json").unwrap();
        let app = create_router(state.clone());

        let request = Request::builder()
            .uri("/api/bins")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // A present artifact never triggers a scan
        assert_eq!(state.trigger.status(), ScanStatus::Idle);
    }
}
