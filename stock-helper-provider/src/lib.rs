//! # stock-helper-provider
//!
//! Upstream clients behind the stock-helper MCP adapters: a brokerage REST
//! client and a messaging session layer, sharing one error type.
//!
//! ## Supported Upstreams
//!
//! | Upstream | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Trading 212](https://t212public-api-docs.redoc.ly/) | `trading212` | HTTP Basic (API key + secret) |
//! | [Telegram](https://core.telegram.org/api) | `telegram` | MTProto user session (base64 string) |
//!
//! ## Feature Flags
//!
//! ### Upstream Selection
//!
//! - **`all-providers`** *(default)*: enable both upstreams.
//! - **`trading212`**: enable only the Trading 212 client.
//! - **`telegram`**: enable only the Telegram session layer (pulls in grammers).
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stock_helper_provider::{OrderHistoryQuery, Trading212Api, Trading212Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Trading212Client::new("api-key".to_string(), "api-secret".to_string())?;
//!
//!     // Bodies come back as untouched JSON.
//!     let cash = client.account_cash().await?;
//!     println!("free cash: {}", cash["free"]);
//!
//!     let query = OrderHistoryQuery {
//!         ticker: Some("AAPL_US_EQ".to_string()),
//!         limit: Some(5),
//!         ..OrderHistoryQuery::default()
//!     };
//!     let page = client.orders_history(&query).await?;
//!     println!("{}", serde_json::to_string_pretty(&page)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError).
//! [`ProviderError::Upstream`] is the upstream's own refusal (non-2xx status)
//! and carries its message; every other variant is a fault on our side of
//! the wire. Nothing is retried.

mod error;
mod http_client;
mod providers;
mod session;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export public traits (internal traits are not exported)
pub use traits::{MessageReader, SessionConnector, Trading212Api};

pub use session::SessionManager;

// Re-export types
pub use types::{
    ChannelMessage, NON_TEXT_PLACEHOLDER, OrderHistoryQuery, Payload, UNKNOWN_SENDER,
};

// Re-export concrete upstreams (behind feature flags)
#[cfg(feature = "trading212")]
pub use providers::{
    DEMO_API_BASE, LIVE_API_BASE, Trading212Client, Trading212ClientBuilder, Trading212Environment,
};

#[cfg(feature = "telegram")]
pub use providers::{
    GrammersConnector, LoginCode, PasswordChallenge, SignInOutcome, TelegramConfig, TelegramLogin,
};
