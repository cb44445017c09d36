//! Binscan CLI - collect, enrich and serve card BINs.

use binscan_cli::config::load_config;
use binscan_cli::{commands, Cli, Command, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> binscan_cli::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let formatter = Formatter::new(cli.format.into(), !cli.no_color);

    match cli.command {
        Command::Scan(args) => {
            commands::execute_scan(&args, config.scan, &formatter).await?;
        }
        Command::Serve(args) => {
            commands::execute_serve(&args, config, &formatter).await?;
        }
    }

    Ok(())
}
