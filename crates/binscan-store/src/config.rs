//! Artifact location settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a run's artifacts are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory holding both artifacts
    /// Default: "data"
    pub data_dir: PathBuf,

    /// File name of the flat CSV artifact
    /// Default: "bins_enriched.csv"
    pub csv_file: String,

    /// File name of the structured JSON artifact
    /// Default: "bins.json"
    pub json_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            csv_file: "bins_enriched.csv".to_string(),
            json_file: "bins.json".to_string(),
        }
    }
}

impl OutputConfig {
    /// Settings with every artifact under `data_dir`
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Full path of the CSV artifact
    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }

    /// Full path of the JSON artifact
    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_file)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.csv_file.trim().is_empty() || self.json_file.trim().is_empty() {
            return Err("output file names must not be empty".to_string());
        }
        if self.csv_file == self.json_file {
            return Err("csv_file and json_file must differ".to_string());
        }
        Ok(())
    }
}
