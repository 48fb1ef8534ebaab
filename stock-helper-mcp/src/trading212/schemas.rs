//! Trading 212 tool parameter schemas
//!
//! Optional arguments are checked for type before they are accepted: a value
//! of the wrong JSON type is dropped as if it had not been supplied, rather
//! than failing the whole call.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use stock_helper_provider::OrderHistoryQuery;

/// Deserialize an optional argument, discarding a value of the wrong type.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parameters for the argument-less account tools.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Parameters for `get_orders_history` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GetOrdersHistoryParams {
    /// Maximum number of orders to return.
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(description = "Maximum number of orders to return (default: 50)")]
    pub limit: Option<u32>,

    /// Ticker filter.
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(description = "Filter orders by specific ticker symbol (e.g., AAPL)")]
    pub ticker: Option<String>,

    /// Pagination cursor.
    #[serde(default, deserialize_with = "lenient")]
    #[schemars(description = "Pagination cursor for fetching more results")]
    pub cursor: Option<i64>,
}

impl GetOrdersHistoryParams {
    pub fn into_query(self) -> OrderHistoryQuery {
        OrderHistoryQuery {
            cursor: self.cursor,
            ticker: self.ticker,
            limit: self.limit,
        }
    }
}
