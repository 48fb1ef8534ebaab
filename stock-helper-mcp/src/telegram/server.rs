//! MCP Server implementation for Telegram channels.
//!
//! The messaging session is established on the first tool call, never on
//! discovery, and shared by every call after that.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_router,
};
use stock_helper_provider::{ChannelMessage, ProviderError, SessionManager};

use crate::envelope::{self, CallResult};
use crate::telegram::schemas::{GetMessagesParams, SearchMessagesParams};

const SERVER_NAME: &str = "telegram-stock-helper";
const FAULT_PREFIX: &str = "Error: ";

/// Messages fetched when the caller gives no limit.
pub const DEFAULT_FETCH_LIMIT: usize = 50;
/// Upper bound on messages fetched in one call.
pub const MAX_FETCH_LIMIT: usize = 100;
/// Search results returned when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
/// Messages requested from the upstream search before truncating to the caller's limit.
pub const SEARCH_FETCH_BATCH: usize = 100;

fn fetch_limit(requested: Option<u32>) -> usize {
    requested.map_or(DEFAULT_FETCH_LIMIT, |n| (n as usize).min(MAX_FETCH_LIMIT))
}

fn search_limit(requested: Option<u32>) -> usize {
    requested.map_or(DEFAULT_SEARCH_LIMIT, |n| n as usize)
}

fn messages_result(outcome: Result<Vec<ChannelMessage>, ProviderError>) -> CallResult {
    match outcome {
        Ok(messages) => CallResult::success(&messages),
        Err(e) => {
            if e.is_expected() {
                tracing::warn!("Telegram call failed: {e}");
            } else {
                tracing::error!("Telegram call failed: {e}");
            }
            CallResult::Failure(format!("{FAULT_PREFIX}{e}"))
        }
    }
}

/// MCP Server for Telegram channels.
#[derive(Clone)]
pub struct TelegramMcp {
    /// Lazily established messaging session.
    sessions: Arc<SessionManager>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl TelegramMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self {
            sessions,
            tool_router: Self::tool_router(),
        }
    }

    async fn fetch(&self, channel: &str, limit: usize) -> Result<Vec<ChannelMessage>, ProviderError> {
        let reader = self.sessions.get().await?;
        reader.get_messages(channel, limit).await
    }

    async fn search(
        &self,
        channel: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ChannelMessage>, ProviderError> {
        let reader = self.sessions.get().await?;
        let mut found = reader
            .search_messages(channel, query, SEARCH_FETCH_BATCH)
            .await?;
        found.truncate(limit);
        Ok(found)
    }
}

#[tool_router]
impl TelegramMcp {
    /// Recent channel messages.
    #[tool(
        description = "Fetch recent messages from a Telegram channel or chat. Useful for getting stock tips, tax discussions, or trading insights."
    )]
    async fn get_telegram_messages(
        &self,
        Parameters(params): Parameters<GetMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = fetch_limit(params.limit);
        let outcome = self.fetch(&params.channel, limit).await;
        Ok(messages_result(outcome).into_tool_result())
    }

    /// Keyword search within a channel.
    #[tool(description = "Search for specific keywords in a Telegram channel's message history")]
    async fn search_telegram_messages(
        &self,
        Parameters(params): Parameters<SearchMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = search_limit(params.limit);
        let outcome = self.search(&params.channel, &params.query, limit).await;
        Ok(messages_result(outcome).into_tool_result())
    }
}

impl ServerHandler for TelegramMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Telegram MCP Server - Read messages from Telegram channels and chats the \
                 configured account can see. Use get_telegram_messages for the latest posts \
                 and search_telegram_messages to find posts by keyword. Channels are given \
                 by username (with or without @) or numeric id."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(envelope::sorted_tools(
            self.tool_router.list_all(),
        )))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if !self
            .tool_router
            .list_all()
            .iter()
            .any(|tool| tool.name == request.name)
        {
            return Ok(envelope::unknown_tool(&request.name));
        }

        let tcc = ToolCallContext::new(self, request, context);
        Ok(self
            .tool_router
            .call(tcc)
            .await
            .unwrap_or_else(|e| envelope::router_failure(FAULT_PREFIX, &e)))
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
