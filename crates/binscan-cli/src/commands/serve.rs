//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::apply_serve_args;
use crate::error::Result;
use crate::output::Formatter;
use binscan_server::config::ServerConfig;
use binscan_server::start_server;

/// Execute the serve command.
pub async fn execute_serve(
    args: &ServeArgs,
    mut config: ServerConfig,
    formatter: &Formatter,
) -> Result<()> {
    apply_serve_args(&mut config, args)?;

    eprintln!(
        "{}",
        formatter.info(&format!("Serving http://{}/api/bins", config.bind_addr()))
    );
    start_server(config).await?;

    Ok(())
}
