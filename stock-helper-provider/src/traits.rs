use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ChannelMessage, OrderHistoryQuery, Payload};

/// Provider 错误构造 Trait（内部使用）
/// 各 Provider 实现此 trait 以统一构造带 provider 标识的错误
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 快捷方法：网络错误
    fn network_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::NetworkError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：会话错误
    fn session_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::Session {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Brokerage account API.
///
/// One method per upstream endpoint, each returning the upstream JSON as-is.
/// An unsuccessful HTTP status comes back as [`ProviderError::Upstream`] and a
/// body that is not JSON as [`ProviderError::ParseError`]; nothing is retried.
#[async_trait]
pub trait Trading212Api: Send + Sync {
    /// Open positions.
    async fn portfolio(&self) -> Result<Payload>;

    /// Cash balances.
    async fn account_cash(&self) -> Result<Payload>;

    /// Historical orders, optionally filtered and paginated.
    async fn orders_history(&self, query: &OrderHistoryQuery) -> Result<Payload>;

    /// Account currency and id.
    async fn account_metadata(&self) -> Result<Payload>;
}

/// Read access to channels through an established messaging session.
#[async_trait]
pub trait MessageReader: Send + Sync {
    /// Most recent messages of `channel`, newest first, at most `limit`.
    async fn get_messages(&self, channel: &str, limit: usize) -> Result<Vec<ChannelMessage>>;

    /// Messages of `channel` matching `query`, newest first, at most `limit`.
    async fn search_messages(
        &self,
        channel: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>>;
}

/// Establishes an authenticated messaging session.
///
/// Called by [`SessionManager`](crate::SessionManager) at most once per
/// successful establishment.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    /// Connect and authenticate, returning the live reader.
    async fn connect(&self) -> Result<Arc<dyn MessageReader>>;
}
