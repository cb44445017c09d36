//! Binscan Storage Layer
//!
//! Implements the `RecordSink` trait with two file artifacts per run.
//!
//! # Artifacts
//!
//! - A flat CSV file, one row per record (`bins_enriched.csv`)
//! - A pretty-printed JSON array of the full records (`bins.json`)
//!
//! Each file is written to a temporary file in the data directory and renamed
//! into place, so readers only ever see a complete artifact. The JSON file is
//! written last; its presence marks a finished run.
//!
//! # Examples
//!
//! ```no_run
//! use binscan_domain::traits::RecordSink;
//! use binscan_domain::RunResult;
//! use binscan_store::{FileSink, OutputConfig};
//!
//! let sink = FileSink::new(OutputConfig::in_dir("data"));
//! sink.persist(&RunResult::default()).unwrap();
//! assert!(sink.artifact_present());
//! ```

#![warn(missing_docs)]

mod config;
mod rows;

pub use config::OutputConfig;
pub use rows::{CsvRow, CSV_HEADER};

use binscan_domain::traits::RecordSink;
use binscan_domain::RunResult;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while writing or reading artifacts
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization or parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Temporary file could not be renamed into place
    #[error("Failed to replace artifact: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// File-backed sink writing the CSV and JSON artifacts
#[derive(Debug, Clone)]
pub struct FileSink {
    config: OutputConfig,
}

impl FileSink {
    /// Create a sink for the given locations
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Artifact locations
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Whether the JSON artifact exists
    pub fn artifact_present(&self) -> bool {
        self.config.json_path().is_file()
    }

    /// Read the JSON artifact
    ///
    /// Returns `Ok(None)` when it does not exist and [`StoreError::Json`] when it
    /// exists but is not valid JSON.
    pub fn read_artifact(&self) -> Result<Option<String>, StoreError> {
        let path = self.config.json_path();
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str::<serde_json::Value>(&body)?;
        Ok(Some(body))
    }

    /// Read and decode the JSON artifact
    pub fn load(&self) -> Result<Option<RunResult>, StoreError> {
        match self.read_artifact()? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn write_csv(&self, run: &RunResult) -> Result<(), StoreError> {
        let dir = &self.config.data_dir;
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer.write_record(CSV_HEADER)?;
            for record in run.records() {
                writer.serialize(CsvRow::from(record))?;
            }
            writer.flush()?;
        }
        replace(temp, &self.config.csv_path())
    }

    fn write_json(&self, run: &RunResult) -> Result<(), StoreError> {
        let dir = &self.config.data_dir;
        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, run)?;
            writer.flush()?;
        }
        replace(temp, &self.config.json_path())
    }
}

fn replace(temp: NamedTempFile, target: &Path) -> Result<(), StoreError> {
    temp.as_file().sync_all()?;
    temp.persist(target)?;
    debug!("Wrote {}", target.display());
    Ok(())
}

impl RecordSink for FileSink {
    type Error = StoreError;

    fn persist(&self, run: &RunResult) -> Result<(), StoreError> {
        fs::create_dir_all(&self.config.data_dir)?;
        self.write_csv(run)?;
        self.write_json(run)?;
        info!(
            "Saved {} records to {} and {}",
            run.len(),
            self.config.csv_path().display(),
            self.config.json_path().display()
        );
        Ok(())
    }
}
