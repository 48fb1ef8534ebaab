use super::*;

use async_trait::async_trait;
use serde_json::json;
use stock_helper_provider::{OrderHistoryQuery, Payload};
use tokio::sync::Mutex;

pub fn upstream_error(status: u16, message: &str) -> ProviderError {
    ProviderError::Upstream {
        provider: "trading212".to_string(),
        message: message.to_string(),
        code: Some(status.to_string()),
        status: Some(status),
    }
}

pub fn network_error(detail: &str) -> ProviderError {
    ProviderError::NetworkError {
        provider: "trading212".to_string(),
        detail: detail.to_string(),
    }
}

pub fn test_position(ticker: &str) -> Payload {
    json!({
        "ticker": ticker,
        "quantity": 2,
        "averagePrice": 100.0,
        "currentPrice": 110.5,
        "ppl": 21
    })
}

pub fn test_metadata() -> Payload {
    json!({"currencyCode": "USD", "id": 42})
}

/// In-memory [`Trading212Api`] that records history queries and can be
/// told to fail every call.
#[derive(Default)]
pub struct MockTrading212Api {
    failure: Mutex<Option<ProviderError>>,
    history_queries: Mutex<Vec<OrderHistoryQuery>>,
    calls: Mutex<Vec<&'static str>>,
}

impl MockTrading212Api {
    pub fn failing(error: ProviderError) -> Self {
        Self {
            failure: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    pub async fn history_queries(&self) -> Vec<OrderHistoryQuery> {
        self.history_queries.lock().await.clone()
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: &'static str) -> Result<(), ProviderError> {
        self.calls.lock().await.push(call);
        match self.failure.lock().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Trading212Api for MockTrading212Api {
    async fn portfolio(&self) -> Result<Payload, ProviderError> {
        self.record("portfolio").await?;
        Ok(json!([test_position("AAPL_US_EQ"), test_position("TSLA_US_EQ")]))
    }

    async fn account_cash(&self) -> Result<Payload, ProviderError> {
        self.record("account_cash").await?;
        Ok(json!({"free": 1500.5, "total": 10000, "blockedForStocks": 0}))
    }

    async fn orders_history(&self, query: &OrderHistoryQuery) -> Result<Payload, ProviderError> {
        self.history_queries.lock().await.push(query.clone());
        self.record("orders_history").await?;
        Ok(json!({
            "items": [{"id": 7, "ticker": "AAPL_US_EQ", "status": "FILLED"}],
            "nextPagePath": null
        }))
    }

    async fn account_metadata(&self) -> Result<Payload, ProviderError> {
        self.record("account_metadata").await?;
        Ok(test_metadata())
    }
}

pub fn build_server(api: Arc<MockTrading212Api>) -> Trading212Mcp {
    Trading212Mcp::new(api)
}
