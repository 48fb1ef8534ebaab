//! Uniform response envelope.
//!
//! Every dispatch outcome becomes one text content item. Payloads are
//! rendered as 2-space indented JSON; error descriptions as plain text.

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content, ResourceContents, Tool};
use serde::Serialize;
use serde_json::{Value, json};

pub const JSON_MIME_TYPE: &str = "application/json";

/// Outcome of a single dispatched call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// Payload to hand back as-is.
    Success(Value),
    /// The upstream refused the call. Shown as ordinary content so the
    /// caller can read the explanation.
    UpstreamFailure(String),
    /// A fault on our side. Shown with the error flag set.
    Failure(String),
}

impl CallResult {
    /// Wrap a serializable payload.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => Self::Success(value),
            Err(e) => {
                tracing::error!("Serialize payload failed: {e}");
                Self::Failure(format!("Failed to serialize response: {e}"))
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Render as a tool call result.
    pub fn into_tool_result(self) -> CallToolResult {
        match self {
            Self::Success(value) => CallToolResult::success(vec![Content::text(pretty(&value))]),
            Self::UpstreamFailure(message) => CallToolResult::success(vec![Content::text(message)]),
            Self::Failure(message) => CallToolResult::error(vec![Content::text(message)]),
        }
    }

    /// Render as the text of a resource read.
    ///
    /// Failures of either kind become `{ "error": <message> }`.
    pub fn into_resource_text(self) -> String {
        match self {
            Self::Success(value) => pretty(&value),
            Self::UpstreamFailure(message) | Self::Failure(message) => error_document(&message),
        }
    }
}

/// 2-space indented JSON.
pub fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// `{ "error": <message> }`, pretty-printed.
pub fn error_document(message: &str) -> String {
    pretty(&json!({ "error": message }))
}

/// JSON text contents for a resource read.
pub fn json_resource(uri: &str, text: String) -> ResourceContents {
    let mut contents = ResourceContents::text(text, uri);
    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
        *mime_type = Some(JSON_MIME_TYPE.to_string());
    }
    contents
}

/// Tool catalog in name order, so discovery is identical across calls and processes.
pub fn sorted_tools(mut tools: Vec<Tool>) -> Vec<Tool> {
    tools.sort_by(|a, b| a.name.cmp(&b.name));
    tools
}

/// Flagged result for an error raised by the tool router itself
/// (malformed arguments and the like).
pub fn router_failure(prefix: &str, error: &McpError) -> CallToolResult {
    tracing::warn!("Tool dispatch rejected: {}", error.message);
    CallResult::Failure(format!("{prefix}{}", error.message)).into_tool_result()
}

/// Flagged result naming an unrecognised tool.
pub fn unknown_tool(name: &str) -> CallToolResult {
    tracing::warn!("Unknown tool requested: {name}");
    CallResult::Failure(format!("Unknown tool: {name}")).into_tool_result()
}
