use serde::{Deserialize, Serialize};

// ============ Order history query ============

/// Optional filters for the order history endpoint.
///
/// Every field is optional. Absent fields are omitted from the query string
/// rather than sent empty, so the upstream applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderHistoryQuery {
    /// Pagination cursor returned by a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<i64>,
    /// Instrument ticker filter (e.g. `AAPL_US_EQ`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    /// Maximum number of orders in the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl OrderHistoryQuery {
    /// Query-string pairs for the supplied fields, in `cursor`, `ticker`, `limit` order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(cursor) = self.cursor {
            pairs.push(("cursor", cursor.to_string()));
        }
        if let Some(ticker) = self.ticker.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("ticker", ticker.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

// ============ Channel messages ============

/// Text shown in place of a message body that carries only media.
pub const NON_TEXT_PLACEHOLDER: &str = "[Media/Non-text content]";

/// Sender shown when the upstream did not attribute the message.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// A single message read from a channel or chat, flattened for callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Message id within the chat.
    pub id: i32,
    /// Unix timestamp (seconds) the message was sent.
    pub date: i64,
    /// Message text, or [`NON_TEXT_PLACEHOLDER`].
    pub text: String,
    /// Sender id, or [`UNKNOWN_SENDER`].
    pub sender: String,
}

impl ChannelMessage {
    /// Build a message, applying the text and sender fallbacks.
    pub fn new(id: i32, date: i64, text: &str, sender: Option<i64>) -> Self {
        Self {
            id,
            date,
            text: if text.is_empty() {
                NON_TEXT_PLACEHOLDER.to_string()
            } else {
                text.to_string()
            },
            sender: sender.map_or_else(|| UNKNOWN_SENDER.to_string(), |id| id.to_string()),
        }
    }
}

// ============ Brokerage payloads ============

/// An upstream JSON body, passed through untouched.
///
/// Brokerage answers are not validated against a schema: numbers keep their
/// integer or float form, object keys keep the upstream order, and `null`s and
/// unknown fields survive.
pub type Payload = serde_json::Value;
