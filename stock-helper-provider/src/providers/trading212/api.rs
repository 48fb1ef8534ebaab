//! Trading 212 Trading212Api trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::Trading212Api;
use crate::types::{OrderHistoryQuery, Payload};

use super::Trading212Client;

#[async_trait]
impl Trading212Api for Trading212Client {
    async fn portfolio(&self) -> Result<Payload> {
        self.get("/equity/portfolio", &[]).await
    }

    async fn account_cash(&self) -> Result<Payload> {
        self.get("/equity/account/cash", &[]).await
    }

    async fn orders_history(&self, query: &OrderHistoryQuery) -> Result<Payload> {
        self.get("/equity/history/orders", &query.to_pairs()).await
    }

    async fn account_metadata(&self) -> Result<Payload> {
        self.get("/equity/account/info", &[]).await
    }
}
