//! Configuration adapters for the MCP servers
//!
//! Bridges the process environment to the typed settings the upstream
//! clients are built from.
//!
//! - **`env_credentials`**: reads `TRADING212_*` and `TELEGRAM_*` variables,
//!   validating presence and shape before any connection is attempted.

mod env_credentials;

pub use env_credentials::{
    ConfigError, TelegramAppSettings, TelegramSettings, Trading212Settings,
};
