//! Environment-variable credential source.
//!
//! Every loader has a `from_lookup` form taking the variable lookup as a
//! closure, so tests never touch the real process environment.

use std::env;

use stock_helper_provider::{ProviderError, Trading212Environment};

pub const TRADING212_API_KEY: &str = "TRADING212_API_KEY";
pub const TRADING212_API_SECRET: &str = "TRADING212_API_SECRET";
pub const TRADING212_ENVIRONMENT: &str = "TRADING212_ENVIRONMENT";
pub const TELEGRAM_API_ID: &str = "TELEGRAM_API_ID";
pub const TELEGRAM_API_HASH: &str = "TELEGRAM_API_HASH";
pub const TELEGRAM_SESSION: &str = "TELEGRAM_SESSION";

/// Startup configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} is invalid: {detail}")]
    Invalid { name: &'static str, detail: String },
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Trading 212 credentials and target environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Trading212Settings {
    pub api_key: String,
    pub api_secret: String,
    pub environment: Trading212Environment,
}

impl std::fmt::Debug for Trading212Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trading212Settings")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .field("environment", &self.environment)
            .finish()
    }
}

impl Trading212Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup(TRADING212_ENVIRONMENT).filter(|v| !v.trim().is_empty()) {
            Some(value) => value.parse().map_err(|e: ProviderError| ConfigError::Invalid {
                name: TRADING212_ENVIRONMENT,
                detail: e.to_string(),
            })?,
            None => Trading212Environment::default(),
        };

        Ok(Self {
            api_key: required(&lookup, TRADING212_API_KEY)?,
            api_secret: required(&lookup, TRADING212_API_SECRET)?,
            environment,
        })
    }
}

/// Telegram application credentials, without a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramAppSettings {
    pub api_id: i32,
    pub api_hash: String,
}

impl TelegramAppSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_id = required(&lookup, TELEGRAM_API_ID)?;
        let api_id = raw_id
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: TELEGRAM_API_ID,
                detail: format!("expected a non-zero integer, got '{raw_id}'"),
            })?;

        Ok(Self {
            api_id,
            api_hash: required(&lookup, TELEGRAM_API_HASH)?,
        })
    }
}

/// Telegram application credentials plus the saved session string.
#[derive(Clone)]
pub struct TelegramSettings {
    pub app: TelegramAppSettings,
    pub session: String,
}

impl std::fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("api_id", &self.app.api_id)
            .field("session", &"***")
            .finish_non_exhaustive()
    }
}

impl TelegramSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let app = TelegramAppSettings::from_lookup(&lookup)?;
        let session = required(&lookup, TELEGRAM_SESSION)?;
        Ok(Self { app, session })
    }
}
