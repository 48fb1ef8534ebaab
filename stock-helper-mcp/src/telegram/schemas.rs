//! Telegram tool parameter schemas
//!
//! Arguments are strictly typed: a missing `channel` or a non-numeric
//! `limit` fails the call with the deserializer's message. A `limit` sent as
//! a whole-valued float (`10.0`) is accepted.

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize an optional count given as an integer or a whole-valued float.
fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(n) = number.as_u64() {
        return u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("limit {n} is too large")));
    }

    match number.as_f64() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(f) if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) => {
            Ok(Some(f as u32))
        }
        _ => Err(D::Error::custom(format!(
            "limit must be a non-negative whole number, got {number}"
        ))),
    }
}

/// Parameters for `get_telegram_messages` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMessagesParams {
    /// Channel username or numeric id.
    #[schemars(description = "Channel username (e.g., 'channelname') or ID")]
    pub channel: String,

    /// Number of messages to fetch.
    #[serde(default, deserialize_with = "whole_number")]
    #[schemars(description = "Number of messages to fetch (default: 50, max: 100)")]
    pub limit: Option<u32>,
}

/// Parameters for `search_telegram_messages` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchMessagesParams {
    /// Channel username or numeric id.
    #[schemars(description = "Channel username or ID")]
    pub channel: String,

    /// Search keywords.
    #[schemars(description = "Search query/keywords")]
    pub query: String,

    /// Maximum number of results.
    #[serde(default, deserialize_with = "whole_number")]
    #[schemars(description = "Max number of results (default: 20)")]
    pub limit: Option<u32>,
}
