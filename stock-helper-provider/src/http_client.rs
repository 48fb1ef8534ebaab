//! Shared request plumbing for the REST upstreams.
//!
//! A provider prepares its own `RequestBuilder` (URL, auth, headers) and hands
//! it to [`HttpUtils::fetch_json`]. Transport failures, non-2xx answers and
//! undecodable bodies each come back as a distinct [`ProviderError`] variant.
//! Nothing is retried.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// Stateless request helpers.
pub struct HttpUtils;

impl HttpUtils {
    /// Send `request` and decode a 2xx JSON body into `T`.
    ///
    /// `label` identifies the call in debug logs, usually `"GET <url>"`.
    pub async fn fetch_json<T>(
        request: RequestBuilder,
        provider: &str,
        label: &str,
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let (status, body) = Self::send(request, provider, label).await?;
        Self::decode(status, &body, provider)
    }

    /// Send `request`, returning the status and body text whatever the status.
    async fn send(
        request: RequestBuilder,
        provider: &str,
        label: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider}] {label}");

        let response = request.send().await.map_err(|e| transport_error(provider, &e))?;
        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!("[{provider}] HTTP {status}: {}", truncate_for_log(&body));
        Ok((status, body))
    }

    /// Turn a status/body pair into a payload or an error.
    ///
    /// 2xx bodies must parse as `T`; anything else is [`ProviderError::Upstream`]
    /// carrying the status and the message from [`extract_error_message`].
    fn decode<T>(status: u16, body: &str, provider: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        if !(200..300).contains(&status) {
            let message = extract_error_message(status, body);
            log::warn!("[{provider}] Upstream refused (HTTP {status}): {message}");
            return Err(ProviderError::Upstream {
                provider: provider.to_string(),
                message,
                code: Some(status.to_string()),
                status: Some(status),
            });
        }

        serde_json::from_str(body).map_err(|e| {
            log::error!(
                "[{provider}] Undecodable body ({e}): {}",
                truncate_for_log(body)
            );
            ProviderError::ParseError {
                provider: provider.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

fn transport_error(provider: &str, error: &reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: error.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: error.to_string(),
        }
    }
}

/// Best-effort message for an error response.
///
/// Prefers the JSON body's non-empty string `message`, then the raw body, then
/// the status reason phrase, then the bare status number.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        });
    if let Some(message) = from_json {
        return message;
    }

    if !body.trim().is_empty() {
        return body.to_string();
    }

    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_json_body() {
        assert_eq!(
            extract_error_message(401, r#"{"message":"invalid token"}"#),
            "invalid token"
        );
    }

    #[test]
    fn json_without_message_falls_back_to_body() {
        let body = r#"{"code":"BusinessException"}"#;
        assert_eq!(extract_error_message(400, body), body);
    }

    #[test]
    fn empty_message_falls_back_to_body() {
        let body = r#"{"message":""}"#;
        assert_eq!(extract_error_message(400, body), body);
    }

    #[test]
    fn plain_text_body_is_used_verbatim() {
        assert_eq!(extract_error_message(500, "upstream exploded"), "upstream exploded");
    }

    #[test]
    fn blank_body_falls_back_to_reason_phrase() {
        assert_eq!(extract_error_message(403, ""), "Forbidden");
        assert_eq!(extract_error_message(429, "  "), "Too Many Requests");
        assert_eq!(extract_error_message(599, ""), "HTTP 599");
    }

    #[test]
    fn decode_success() {
        let value: serde_json::Value = HttpUtils::decode(200, r#"{"id":42}"#, "test").unwrap();
        assert_eq!(value["id"], 42);
    }

    #[test]
    fn decode_error_status_is_upstream() {
        let result: Result<serde_json::Value, ProviderError> =
            HttpUtils::decode(401, r#"{"message":"invalid token"}"#, "test");
        match result {
            Err(ProviderError::Upstream {
                message,
                code,
                status,
                ..
            }) => {
                assert_eq!(message, "invalid token");
                assert_eq!(code.as_deref(), Some("401"));
                assert_eq!(status, Some(401));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn decode_bad_success_body_is_parse_error() {
        let result: Result<Vec<u32>, ProviderError> = HttpUtils::decode(200, "not json", "test");
        assert!(
            matches!(result, Err(ProviderError::ParseError { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn decode_ignores_body_shape_on_error_status() {
        let result: Result<Vec<u32>, ProviderError> =
            HttpUtils::decode(502, "<html>bad gateway</html>", "test");
        assert!(matches!(result, Err(ProviderError::Upstream { status: Some(502), .. })));
    }
}
