//! Process shell shared by the server binaries.
//!
//! stdout carries MCP frames, so everything else goes to stderr.

use std::process::ExitCode;

use rmcp::{ServerHandler, ServiceExt};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log targets of the messaging library. Silenced unless re-enabled through `RUST_LOG`.
const QUIET_TARGETS: &[&str] = &[
    "grammers_client",
    "grammers_mtsender",
    "grammers_mtproto",
    "grammers_session",
    "grammers_crypto",
];

/// Filter with the quiet targets switched off, followed by the user's directives.
pub fn log_filter(user_directives: Option<&str>) -> EnvFilter {
    let mut directives: Vec<String> = QUIET_TARGETS.iter().map(|t| format!("{t}=off")).collect();
    if let Some(user) = user_directives.filter(|d| !d.trim().is_empty()) {
        directives.push(user.to_string());
    }

    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives.join(","))
}

/// Initialize tracing to stderr (MCP uses stdout for protocol).
pub fn init_tracing() {
    let user = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(log_filter(user.as_deref()))
        .try_init();
}

#[cfg(not(panic = "unwind"))]
compile_error!("MCP servers must be built with panic = \"unwind\" to survive handler panics");

/// Report panics on stderr. Panicking request tasks are isolated by the runtime,
/// so the server keeps serving.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Uncaught panic: {info}");
    }));
}

/// Serve `server` on stdio until the client disconnects.
pub async fn serve_stdio<S: ServerHandler>(server: S, name: &str) -> ExitCode {
    tracing::info!("Starting {name} on stdio transport");
    let service = match server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start {name}: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = service.waiting().await {
        tracing::error!("{name} error: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("{name} stopped");
    ExitCode::SUCCESS
}
