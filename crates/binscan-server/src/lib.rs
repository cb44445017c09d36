//! Binscan Server
//!
//! Serves the JSON artifact of the last scan over HTTP and owns the single
//! background scan that produces it when it is missing.
//!
//! # Routes
//!
//! - `GET /api/bins`: the artifact, or 404 while the background scan runs
//! - `GET /api/scan/status`: background scan status
//! - `GET /health`: liveness plus artifact presence

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod trigger;

use binscan_store::FileSink;
use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use trigger::ScanTrigger;

pub use trigger::ScanStatus;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the application state for `config`
///
/// Checks artifact freshness: if the JSON artifact is missing, the background
/// scan is started right away.
pub fn prepare_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let trigger = ScanTrigger::for_scan(&config.scan).map_err(ServerError::Server)?;
    let sink = FileSink::new(config.scan.output.clone());

    if sink.artifact_present() {
        info!("Serving existing artifact {}", sink.config().json_path().display());
    } else {
        info!(
            "Artifact {} missing, starting background scan",
            sink.config().json_path().display()
        );
        trigger.ensure_started();
    }

    Ok(AppState {
        trigger: Arc::new(trigger),
        sink: Arc::new(sink),
        cache_max_age_secs: config.cache_max_age_secs,
    })
}

/// Start the HTTP server
///
/// Validates configuration, checks artifact freshness and serves until the
/// listener ends.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting binscan server");
    info!("Bind address: {}", config.bind_addr());
    info!("Sources: {}", config.scan.sources.len());

    let state = prepare_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
