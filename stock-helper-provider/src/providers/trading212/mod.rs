//! Trading 212 brokerage API client

mod api;
mod http;

use std::fmt;
use std::str::FromStr;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::providers::common::{create_http_client, require_credential};
use crate::traits::ProviderErrorMapper;

pub(crate) const PROVIDER_NAME: &str = "trading212";

/// Live (real money) API root.
pub const LIVE_API_BASE: &str = "https://live.trading212.com/api/v0";
/// Demo (practice) API root.
pub const DEMO_API_BASE: &str = "https://demo.trading212.com/api/v0";

/// Which Trading 212 environment the client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Trading212Environment {
    #[default]
    Live,
    Demo,
}

impl Trading212Environment {
    /// API root for this environment.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Live => LIVE_API_BASE,
            Self::Demo => DEMO_API_BASE,
        }
    }
}

impl fmt::Display for Trading212Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Demo => f.write_str("demo"),
        }
    }
}

impl FromStr for Trading212Environment {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "demo" => Ok(Self::Demo),
            other => Err(ProviderError::InvalidConfiguration {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("unknown environment '{other}', expected 'live' or 'demo'"),
            }),
        }
    }
}

/// Trading 212 API client.
///
/// Authenticates every request with HTTP Basic auth built from the API key
/// and secret. Holds no other state: nothing is cached and nothing is retried.
///
/// # Construction
///
/// ```rust,no_run
/// use stock_helper_provider::{Trading212Client, Trading212Environment};
///
/// let client = Trading212Client::builder("api-key".to_string(), "api-secret".to_string())
///     .environment(Trading212Environment::Demo)
///     .build()?;
/// # Ok::<(), stock_helper_provider::ProviderError>(())
/// ```
pub struct Trading212Client {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) api_secret: String,
}

/// Builder for [`Trading212Client`].
pub struct Trading212ClientBuilder {
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl Trading212ClientBuilder {
    fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            base_url: LIVE_API_BASE.to_string(),
        }
    }

    /// Select the live or demo environment (default: live).
    pub fn environment(mut self, environment: Trading212Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    /// Override the API root, e.g. to point at a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the credentials and build the client.
    ///
    /// Fails with [`ProviderError::InvalidConfiguration`] when either
    /// credential component is blank.
    pub fn build(self) -> Result<Trading212Client> {
        require_credential(PROVIDER_NAME, "API key", &self.api_key)?;
        require_credential(PROVIDER_NAME, "API secret", &self.api_secret)?;

        Ok(Trading212Client {
            client: create_http_client(PROVIDER_NAME)?,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key: self.api_key,
            api_secret: self.api_secret,
        })
    }
}

impl Trading212Client {
    /// Creates a live-environment client.
    pub fn new(api_key: String, api_secret: String) -> Result<Self> {
        Self::builder(api_key, api_secret).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(api_key: String, api_secret: String) -> Trading212ClientBuilder {
        Trading212ClientBuilder::new(api_key, api_secret)
    }

    /// API root this client sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl ProviderErrorMapper for Trading212Client {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
