//! Interactive user login, used to produce a reusable session string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use grammers_client::types::{LoginToken, PasswordToken};
use grammers_client::{Client, SignInError};
use grammers_session::Session;

use crate::error::{ProviderError, Result};
use crate::traits::ProviderErrorMapper;

use super::{PROVIDER_NAME, client_config, validate_app_credentials};

/// A login code has been sent to the account.
pub struct LoginCode(LoginToken);

/// The account has two-step verification enabled.
pub struct PasswordChallenge(PasswordToken);

impl PasswordChallenge {
    /// Password hint configured by the account owner.
    pub fn hint(&self) -> Option<&str> {
        self.0.hint()
    }
}

/// Result of submitting a login code.
pub enum SignInOutcome {
    SignedIn,
    PasswordRequired(PasswordChallenge),
}

/// Fresh, unauthenticated connection that walks through the login flow.
pub struct TelegramLogin {
    client: Client,
}

impl ProviderErrorMapper for TelegramLogin {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

impl TelegramLogin {
    /// Connect with an empty session.
    pub async fn connect(api_id: i32, api_hash: &str) -> Result<Self> {
        validate_app_credentials(api_id, api_hash)?;
        let client = Client::connect(client_config(Session::new(), api_id, api_hash))
            .await
            .map_err(|e| ProviderError::NetworkError {
                provider: PROVIDER_NAME.to_string(),
                detail: e.to_string(),
            })?;
        Ok(Self { client })
    }

    /// Ask Telegram to send a login code to `phone`.
    pub async fn request_code(&self, phone: &str) -> Result<LoginCode> {
        self.client
            .request_login_code(phone.trim())
            .await
            .map(LoginCode)
            .map_err(|e| self.session_error(e))
    }

    /// Submit the code received on the account.
    pub async fn sign_in(&self, code: &LoginCode, received: &str) -> Result<SignInOutcome> {
        match self.client.sign_in(&code.0, received.trim()).await {
            Ok(_) => Ok(SignInOutcome::SignedIn),
            Err(SignInError::PasswordRequired(token)) => {
                Ok(SignInOutcome::PasswordRequired(PasswordChallenge(token)))
            }
            Err(e) => Err(self.session_error(e)),
        }
    }

    /// Complete two-step verification.
    pub async fn check_password(&self, challenge: PasswordChallenge, password: &str) -> Result<()> {
        self.client
            .check_password(challenge.0, password.trim())
            .await
            .map(|_| ())
            .map_err(|e| self.session_error(e))
    }

    /// Base64 session string for the authenticated connection.
    pub fn session_string(&self) -> String {
        STANDARD.encode(self.client.session().save())
    }
}
