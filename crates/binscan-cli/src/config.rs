//! Configuration loading and command-line overrides.
//!
//! The CLI reads the same TOML file as the server: top-level server settings
//! plus a `[scan]` table. Without a file the built-in defaults are used.

use crate::cli::{ScanArgs, ServeArgs};
use crate::error::{CliError, Result};
use binscan_scanner::ScanConfig;
use binscan_server::config::ServerConfig;
use std::path::Path;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Load configuration from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => Ok(ServerConfig::from_file(path)?),
        None => Ok(ServerConfig::default()),
    }
}

/// Apply `scan` flags on top of the file configuration.
pub fn apply_scan_args(config: &mut ScanConfig, args: &ScanArgs) -> Result<()> {
    if let Some(country) = &args.only_country {
        config.filters.only_country = Some(country.to_ascii_uppercase());
    }
    if args.min_prepaid {
        config.filters.prepaid_only = true;
    }
    if args.no_enrich {
        config.enrich = false;
    }
    if let Some(dir) = &args.data_dir {
        config.output.data_dir = dir.clone();
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Apply `serve` flags on top of the file configuration.
pub fn apply_serve_args(config: &mut ServerConfig, args: &ServeArgs) -> Result<()> {
    if let Some(port) = args.port {
        config.bind_port = port;
    }
    Ok(config.validate()?)
}
