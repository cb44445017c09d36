//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Binscan - Collect and enrich card BINs from public datasets.
#[derive(Debug, Parser)]
#[command(name = "binscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true, env = "BINSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (artifact paths only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch sources, enrich BINs and write the CSV and JSON artifacts
    Scan(ScanArgs),

    /// Serve the JSON artifact over HTTP, scanning once if it is missing
    Serve(ServeArgs),
}

/// Arguments for the scan command.
#[derive(Debug, Default, Parser)]
pub struct ScanArgs {
    /// Keep only BINs issued in this country (2-letter code)
    #[arg(long, value_name = "XX")]
    pub only_country: Option<String>,

    /// Keep only prepaid BINs
    #[arg(long)]
    pub min_prepaid: bool,

    /// Skip the lookup service, only extract and deduplicate
    #[arg(long)]
    pub no_enrich: bool,

    /// Directory for the output artifacts
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Arguments for the serve command.
#[derive(Debug, Default, Parser)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_command() {
        let cli = Cli::parse_from([
            "binscan",
            "scan",
            "--only-country",
            "US",
            "--min-prepaid",
            "--data-dir",
            "/tmp/out",
        ]);
        match cli.command {
            Command::Scan(args) => {
                assert_eq!(args.only_country.as_deref(), Some("US"));
                assert!(args.min_prepaid);
                assert!(!args.no_enrich);
                assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/out")));
            }
            _ => panic!("Expected Scan command"),
        }
        assert_eq!(cli.format, CliFormat::Table);
    }

    #[test]
    fn test_serve_command_with_global_flags() {
        let cli = Cli::parse_from([
            "binscan",
            "--config",
            "binscan.toml",
            "serve",
            "--port",
            "9090",
            "--format",
            "json",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("binscan.toml")));
        assert_eq!(cli.format, CliFormat::Json);
        match cli.command {
            Command::Serve(args) => assert_eq!(args.port, Some(9090)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["binscan"]).is_err());
    }
}
