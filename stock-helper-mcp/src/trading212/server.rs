//! MCP Server implementation for a Trading 212 account.
//!
//! Exposes 4 read-only tools and the matching `trading212://` resources.
//! Both surfaces go through the same [`Trading212Api`] calls.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListResourcesResult,
        ListToolsResult, PaginatedRequestParams, ProtocolVersion, ReadResourceRequestParams,
        ReadResourceResult, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_router,
};
use serde::Serialize;
use stock_helper_provider::{ProviderError, Trading212Api};

use crate::envelope::{self, CallResult};
use crate::trading212::resources::{self, ResourceRoute};
use crate::trading212::schemas::{GetOrdersHistoryParams, NoParams};

const SERVER_NAME: &str = "trading212-mcp-server";
const FAULT_PREFIX: &str = "Error executing tool: ";

/// Run one upstream call and classify the outcome.
///
/// Upstream refusals come back as readable content; anything else is a fault.
async fn run_api_call<T: Serialize>(
    subject: &str,
    future: impl Future<Output = Result<T, ProviderError>>,
) -> CallResult {
    match future.await {
        Ok(payload) => CallResult::success(&payload),
        Err(e) if e.is_upstream() => {
            tracing::warn!("Fetch {subject} rejected upstream: {e}");
            CallResult::UpstreamFailure(format!("Error fetching {subject}: {e}"))
        }
        Err(e) => {
            if e.is_expected() {
                tracing::warn!("Fetch {subject} failed: {e}");
            } else {
                tracing::error!("Fetch {subject} failed: {e}");
            }
            CallResult::Failure(format!("{FAULT_PREFIX}{e}"))
        }
    }
}

/// MCP Server for a Trading 212 account.
#[derive(Clone)]
pub struct Trading212Mcp {
    /// Upstream API client.
    api: Arc<dyn Trading212Api>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl Trading212Mcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(api: Arc<dyn Trading212Api>) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    async fn dispatch(&self, route: ResourceRoute) -> CallResult {
        let subject = resources::subject(&route);
        match route {
            ResourceRoute::Portfolio => run_api_call(subject, self.api.portfolio()).await,
            ResourceRoute::AccountCash => run_api_call(subject, self.api.account_cash()).await,
            ResourceRoute::OrdersHistory(query) => {
                run_api_call(subject, self.api.orders_history(&query)).await
            }
            ResourceRoute::AccountMetadata => {
                run_api_call(subject, self.api.account_metadata()).await
            }
        }
    }

    /// Resource read, with every failure folded into the contents text.
    pub async fn read_resource_text(&self, uri: &str) -> String {
        let result = match resources::route(uri) {
            Ok(route) => self.dispatch(route).await,
            Err(description) => {
                tracing::warn!("Resource read rejected: {description}");
                CallResult::Failure(description)
            }
        };
        result.into_resource_text()
    }
}

#[tool_router]
impl Trading212Mcp {
    /// Open positions.
    #[tool(
        description = "Get complete portfolio overview including cash, invested amount, total value, and all positions"
    )]
    async fn get_portfolio(
        &self,
        _params: Parameters<NoParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(ResourceRoute::Portfolio).await.into_tool_result())
    }

    /// Cash balances.
    #[tool(
        description = "Get account cash information including free cash, total cash, and blocked amounts"
    )]
    async fn get_account_cash(
        &self,
        _params: Parameters<NoParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(ResourceRoute::AccountCash).await.into_tool_result())
    }

    /// Historical orders.
    #[tool(description = "Get historical orders with optional filtering by ticker and pagination")]
    async fn get_orders_history(
        &self,
        Parameters(params): Parameters<GetOrdersHistoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let route = ResourceRoute::OrdersHistory(params.into_query());
        Ok(self.dispatch(route).await.into_tool_result())
    }

    /// Account metadata.
    #[tool(description = "Get account metadata including currency and account ID")]
    async fn get_account_metadata(
        &self,
        _params: Parameters<NoParams>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.dispatch(ResourceRoute::AccountMetadata).await.into_tool_result())
    }
}

impl ServerHandler for Trading212Mcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Trading 212 MCP Server - Read-only access to a Trading 212 account. \
                 Use get_portfolio for open positions, get_account_cash for balances, \
                 get_orders_history for past orders (filter by ticker, paginate with cursor) \
                 and get_account_metadata for the account currency. \
                 The same data is available as trading212:// resources."
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

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult::with_all_items(resources::catalog()))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let text = self.read_resource_text(&request.uri).await;
        Ok(ReadResourceResult {
            contents: vec![envelope::json_resource(&request.uri, text)],
        })
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
