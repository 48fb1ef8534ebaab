//! Upstream API implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "telegram")]
mod telegram;
#[cfg(feature = "trading212")]
mod trading212;

#[cfg(feature = "telegram")]
pub use telegram::{
    GrammersConnector, LoginCode, PasswordChallenge, SignInOutcome, TelegramConfig, TelegramLogin,
};
#[cfg(feature = "trading212")]
pub use trading212::{
    DEMO_API_BASE, LIVE_API_BASE, Trading212Client, Trading212ClientBuilder, Trading212Environment,
};
