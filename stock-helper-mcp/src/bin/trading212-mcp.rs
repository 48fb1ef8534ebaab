//! MCP server entry point for a Trading 212 account.
//!
//! Reads credentials from the environment and serves the account over stdio.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use stock_helper_mcp::adapters::Trading212Settings;
use stock_helper_mcp::shell;
use stock_helper_mcp::trading212::Trading212Mcp;
use stock_helper_provider::Trading212Client;

const NAME: &str = "Trading 212 MCP server";

fn build_server() -> anyhow::Result<Trading212Mcp> {
    let settings = Trading212Settings::from_env().context("Failed to load Trading 212 settings")?;
    let client = Trading212Client::builder(settings.api_key, settings.api_secret)
        .environment(settings.environment)
        .build()
        .context("Failed to create Trading 212 client")?;

    tracing::info!(
        "Trading 212 client ready ({} environment, {})",
        settings.environment,
        client.base_url()
    );
    Ok(Trading212Mcp::new(Arc::new(client)))
}

#[tokio::main]
async fn main() -> ExitCode {
    shell::init_tracing();
    shell::install_panic_hook();

    let server = match build_server() {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    shell::serve_stdio(server, NAME).await
}
