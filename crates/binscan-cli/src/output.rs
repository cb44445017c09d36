//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use binscan_scanner::{OutputConfig, ScanMetrics, ScanOutcome};
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
};

/// Machine-readable scan report.
#[derive(Debug, Serialize)]
struct ScanReport<'a> {
    csv: String,
    json: String,
    records: usize,
    metrics: &'a ScanMetrics,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the result of a scan.
    pub fn format_scan(&self, outcome: &ScanOutcome, output: &OutputConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_scan_json(outcome, output),
            OutputFormat::Table => Ok(self.format_scan_table(outcome, output)),
            OutputFormat::Quiet => Ok(format!(
                "{}\n{}",
                output.csv_path().display(),
                output.json_path().display()
            )),
        }
    }

    fn format_scan_json(&self, outcome: &ScanOutcome, output: &OutputConfig) -> Result<String> {
        let report = ScanReport {
            csv: output.csv_path().display().to_string(),
            json: output.json_path().display().to_string(),
            records: outcome.result.len(),
            metrics: &outcome.metrics,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn format_scan_table(&self, outcome: &ScanOutcome, output: &OutputConfig) -> String {
        let metrics = &outcome.metrics;
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);

        let sources = format!(
            "{} / {}",
            metrics.sources_fetched, metrics.sources_total
        );
        let rows: Vec<(&str, String)> = vec![
            ("Sources fetched", sources),
            ("Candidates seen", metrics.candidates_seen.to_string()),
            ("Unique BINs", metrics.unique_bins.to_string()),
            ("enriched_ok", self.count(metrics.enriched_ok, "green")),
            ("no_data", self.count(metrics.no_data, "yellow")),
            ("enrich_error", self.count(metrics.enrich_errors, "red")),
            ("Lookup calls", metrics.total_attempts.to_string()),
            ("Retries", metrics.retries.to_string()),
            ("Records written", metrics.records_kept.to_string()),
            ("Runtime", format!("{:.1}s", metrics.runtime_ms as f64 / 1000.0)),
        ];
        for (label, value) in &rows {
            builder.push_record([*label, value.as_str()]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::last()).with(Alignment::right()));

        let mut lines = vec![table.to_string()];
        if metrics.sources_failed > 0 {
            lines.push(self.warning(&format!(
                "{} source(s) could not be fetched",
                metrics.sources_failed
            )));
        }
        lines.push(self.success(&format!(
            "Saved {} and {}",
            output.csv_path().display(),
            output.json_path().display()
        )));
        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn count(&self, value: usize, color: &str) -> String {
        if value == 0 {
            value.to_string()
        } else {
            self.colorize(&value.to_string(), color)
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binscan_domain::{Bin, Enrichment, Record, RunResult};

    fn create_test_outcome() -> ScanOutcome {
        let mut metrics = ScanMetrics::new();
        metrics.sources_total = 3;
        metrics.sources_fetched = 2;
        metrics.sources_failed = 1;
        metrics.unique_bins = 2;
        metrics.enriched_ok = 1;
        metrics.enrich_errors = 1;
        metrics.records_kept = 2;

        let result = RunResult::new(vec![
            Record::from_enrichment(Bin::parse("411111").unwrap(), Enrichment::NoData),
            Record::from_enrichment(
                Bin::parse("999999").unwrap(),
                Enrichment::Failed("HTTP 500: Internal Server Error".into()),
            ),
        ]);
        ScanOutcome { result, metrics }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_scan(&create_test_outcome(), &OutputConfig::in_dir("out"))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records"], 2);
        assert_eq!(value["json"], "out/bins.json");
        assert_eq!(value["metrics"]["sources_failed"], 1);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_scan(&create_test_outcome(), &OutputConfig::in_dir("out"))
            .unwrap();
        assert_eq!(output, "out/bins_enriched.csv\nout/bins.json");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_scan(&create_test_outcome(), &OutputConfig::default())
            .unwrap();
        assert!(output.contains("Unique BINs"));
        assert!(output.contains("enrich_error"));
        assert!(output.contains("2 / 3"));
        assert!(output.contains("⚠ 1 source(s) could not be fetched"));
        assert!(output.contains("✓ Saved data/bins_enriched.csv and data/bins.json"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }
}
