//! Telegram MTProto session layer (grammers)

mod login;
mod reader;

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use grammers_client::{Client, Config, InitParams};
use grammers_session::Session;

use crate::error::{ProviderError, Result};
use crate::providers::common::require_credential;
use crate::traits::{MessageReader, ProviderErrorMapper, SessionConnector};

pub use login::{LoginCode, PasswordChallenge, SignInOutcome, TelegramLogin};
use reader::GrammersReader;

pub(crate) const PROVIDER_NAME: &str = "telegram";

/// Validated application credentials plus a saved session.
#[derive(Clone)]
pub struct TelegramConfig {
    api_id: i32,
    api_hash: String,
    session: Vec<u8>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_id", &self.api_id)
            .field("api_hash", &"***")
            .field("session", &format_args!("<{} bytes>", self.session.len()))
            .finish()
    }
}

impl TelegramConfig {
    /// Validate the credentials and decode the base64 session string.
    ///
    /// Fails with [`ProviderError::InvalidConfiguration`] on a zero `api_id`,
    /// a blank `api_hash`, or a blank or undecodable `session`.
    pub fn new(api_id: i32, api_hash: String, session: &str) -> Result<Self> {
        validate_app_credentials(api_id, &api_hash)?;
        require_credential(PROVIDER_NAME, "session string", session)?;

        let session = STANDARD
            .decode(session.trim())
            .map_err(|e| config_error(format!("session string is not valid base64: {e}")))?;

        Ok(Self {
            api_id,
            api_hash,
            session,
        })
    }

    pub fn api_id(&self) -> i32 {
        self.api_id
    }
}

fn config_error(detail: impl ToString) -> ProviderError {
    ProviderError::InvalidConfiguration {
        provider: PROVIDER_NAME.to_string(),
        detail: detail.to_string(),
    }
}

pub(crate) fn validate_app_credentials(api_id: i32, api_hash: &str) -> Result<()> {
    if api_id == 0 {
        return Err(config_error("API id is required"));
    }
    require_credential(PROVIDER_NAME, "API hash", api_hash)
}

pub(crate) fn client_config(session: Session, api_id: i32, api_hash: &str) -> Config {
    Config {
        session,
        api_id,
        api_hash: api_hash.to_string(),
        params: InitParams::default(),
    }
}

/// Connects to Telegram with a saved user session.
pub struct GrammersConnector {
    config: TelegramConfig,
}

impl GrammersConnector {
    pub fn new(config: TelegramConfig) -> Self {
        Self { config }
    }
}

impl ProviderErrorMapper for GrammersConnector {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

#[async_trait]
impl SessionConnector for GrammersConnector {
    async fn connect(&self) -> Result<Arc<dyn MessageReader>> {
        let session = Session::load(&self.config.session)
            .map_err(|e| self.session_error(format!("failed to load session: {e}")))?;

        log::debug!("[{PROVIDER_NAME}] connecting (api_id {})", self.config.api_id);
        let client = Client::connect(client_config(
            session,
            self.config.api_id,
            &self.config.api_hash,
        ))
        .await
        .map_err(|e| self.network_error(e))?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| self.network_error(e))?;
        if !authorized {
            return Err(self.session_error(
                "session is not authorized, generate a new one with telegram-session",
            ));
        }

        Ok(Arc::new(GrammersReader::new(client)))
    }
}
