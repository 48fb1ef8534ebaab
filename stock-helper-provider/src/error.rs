use serde::{Deserialize, Serialize};

/// Failure of an upstream operation.
///
/// Every variant names the upstream (`trading212`, `telegram`) that produced it and
/// serializes with a `kind` tag.
///
/// # Upstream Errors
///
/// [`Upstream`](Self::Upstream) is the only variant produced from a well-formed but
/// unsuccessful upstream answer (non-2xx HTTP status). It is data, not a fault: adapters
/// report it back to the caller as ordinary content. Every other variant is a fault.
///
/// Nothing is retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProviderError {
    /// Credentials or settings are missing or malformed.
    ///
    /// Raised at construction time, before any network call.
    InvalidConfiguration {
        provider: String,
        /// Which setting is wrong and how.
        detail: String,
    },

    /// The upstream API answered with a non-success HTTP status.
    Upstream {
        provider: String,
        /// Best-effort message extracted from the response.
        message: String,
        /// Raw status code rendered as a string.
        code: Option<String>,
        /// Numeric HTTP status.
        status: Option<u16>,
    },

    /// The upstream could not be reached, or the connection dropped mid-answer.
    NetworkError {
        provider: String,
        detail: String,
    },

    /// No answer within the client timeout.
    Timeout {
        provider: String,
        detail: String,
    },

    /// A 2xx body that does not decode into the expected shape.
    ParseError {
        provider: String,
        /// Decoder message.
        detail: String,
    },

    /// The upstream session could not be established or was rejected.
    Session {
        provider: String,
        detail: String,
    },

    /// The requested channel or chat could not be resolved.
    ChannelNotFound {
        provider: String,
        /// Identifier as supplied by the caller.
        channel: String,
    },
}

impl ProviderError {
    /// Whether this error carries an upstream answer rather than a fault.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// 是否为预期行为（配置、上游拒绝、频道不存在），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::Upstream { .. } | Self::ChannelNotFound { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfiguration { provider, detail } => {
                write!(f, "[{provider}] Invalid configuration: {detail}")
            }
            Self::Upstream { message, .. } => write!(f, "API Error: {message}"),
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::Session { provider, detail } => {
                write!(f, "[{provider}] Session error: {detail}")
            }
            Self::ChannelNotFound { provider, channel } => {
                write!(f, "[{provider}] Channel '{channel}' not found")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_upstream_has_api_error_prefix() {
        let e = ProviderError::Upstream {
            provider: "trading212".to_string(),
            message: "invalid token".to_string(),
            code: Some("401".to_string()),
            status: Some(401),
        };
        assert_eq!(e.to_string(), "API Error: invalid token");
    }

    #[test]
    fn display_invalid_configuration() {
        let e = ProviderError::InvalidConfiguration {
            provider: "trading212".to_string(),
            detail: "API key is required".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[trading212] Invalid configuration: API key is required"
        );
    }

    #[test]
    fn display_transport_faults() {
        let refused = ProviderError::NetworkError {
            provider: "trading212".to_string(),
            detail: "connection refused".to_string(),
        };
        let slow = ProviderError::Timeout {
            provider: "trading212".to_string(),
            detail: "operation timed out".to_string(),
        };
        assert_eq!(refused.to_string(), "[trading212] Network error: connection refused");
        assert_eq!(slow.to_string(), "[trading212] Request timeout: operation timed out");
    }

    #[test]
    fn display_session_and_channel() {
        let session = ProviderError::Session {
            provider: "telegram".to_string(),
            detail: "not authorized".to_string(),
        };
        let channel = ProviderError::ChannelNotFound {
            provider: "telegram".to_string(),
            channel: "nosuch".to_string(),
        };
        assert_eq!(session.to_string(), "[telegram] Session error: not authorized");
        assert_eq!(channel.to_string(), "[telegram] Channel 'nosuch' not found");
    }

    #[test]
    fn only_upstream_is_upstream() {
        let upstream = ProviderError::Upstream {
            provider: "t".into(),
            message: "m".into(),
            code: None,
            status: None,
        };
        let fault = ProviderError::ParseError {
            provider: "t".into(),
            detail: "bad".into(),
        };
        assert!(upstream.is_upstream());
        assert!(!fault.is_upstream());
        assert!(upstream.is_expected());
        assert!(!fault.is_expected());
    }

    #[test]
    fn serialize_carries_kind_tag_and_status() {
        let e = ProviderError::Upstream {
            provider: "trading212".to_string(),
            message: "forbidden".to_string(),
            code: Some("403".to_string()),
            status: Some(403),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"kind\":\"Upstream\""));
        assert!(json.contains("\"status\":403"));
    }
}
