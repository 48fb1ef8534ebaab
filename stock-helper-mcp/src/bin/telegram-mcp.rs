//! MCP server entry point for Telegram channels.
//!
//! The session string is validated at startup; the connection itself is
//! made on the first tool call.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use stock_helper_mcp::adapters::TelegramSettings;
use stock_helper_mcp::shell;
use stock_helper_mcp::telegram::TelegramMcp;
use stock_helper_provider::{GrammersConnector, SessionManager, TelegramConfig};

const NAME: &str = "Telegram MCP server";

fn build_server() -> anyhow::Result<TelegramMcp> {
    let settings = TelegramSettings::from_env().context("Failed to load Telegram settings")?;
    let config = TelegramConfig::new(settings.app.api_id, settings.app.api_hash, &settings.session)
        .context("Invalid Telegram configuration")?;

    tracing::info!("Telegram session loaded for app {}", config.api_id());
    let sessions = SessionManager::new(Arc::new(GrammersConnector::new(config)));
    Ok(TelegramMcp::new(Arc::new(sessions)))
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
