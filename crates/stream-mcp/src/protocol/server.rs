//! Stream MCP Server Implementation
//!
//! This module implements the MCP server using rmcp 0.9's #[tool_router] pattern.
//! Prompts and resources are served from registries built once at startup.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

use stream_mcp_core::{Error, ServerConfig, StreamSettings};
use stream_mcp_emitter::{CancellationToken, NotificationEmitter, NotificationSink};

use crate::prompts::PromptRegistry;
use crate::resources::ResourceRegistry;
use crate::sink::PeerSink;
use crate::tools::*;

/// Map a core error onto the MCP error space.
fn to_mcp_error(e: Error) -> McpError {
    match e {
        Error::InvalidInput(msg) => McpError::invalid_params(msg, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Re-shape one of our serializable descriptions into an rmcp model type.
fn to_model<T: DeserializeOwned>(value: impl Serialize) -> Result<T, McpError> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| McpError::internal_error(format!("Failed to build MCP payload: {e}"), None))
}

/// Stream MCP Server
///
/// Holds immutable name-to-handler tables for tools, prompts and resources.
/// Every tool invocation owns its own emitter run; nothing is shared between
/// invocations.
#[derive(Clone)]
pub struct StreamMcpServer {
    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
    /// Prompt templates by name
    prompts: Arc<PromptRegistry>,
    /// Static documents by URI
    resources: Arc<ResourceRegistry>,
    /// Defaults for omitted stream parameters
    stream_settings: StreamSettings,
    /// Name reported to clients
    name: String,
}

#[tool_router]
impl StreamMcpServer {
    /// Create a new Stream MCP Server with default configuration
    pub fn new() -> Self {
        Self::from_config(&ServerConfig::default())
    }

    /// Create a new Stream MCP Server from a loaded configuration
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            prompts: Arc::new(PromptRegistry::new()),
            resources: Arc::new(ResourceRegistry::new(&config.resource)),
            stream_settings: config.stream,
            name: config.server.name.clone(),
        }
    }

    /// Send periodic notifications to the invoking client
    #[tool(
        name = "start-notification-stream",
        description = "Starts sending periodic notifications for testing resumability"
    )]
    #[instrument(skip_all)]
    async fn start_notification_stream(
        &self,
        Parameters(params): Parameters<StartNotificationStreamParams>,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let sink: Arc<dyn NotificationSink> = Arc::new(PeerSink::new(context.peer.clone()));

        // Child token so that ending the run never cancels the request itself
        self.run_stream(params, sink, context.ct.child_token()).await
    }
}

impl StreamMcpServer {
    /// Run one notification stream against `sink` and build the tool result.
    ///
    /// The run is spawned on its own task and owns `cancel`; if this future
    /// is dropped the run is cancelled at its next wait boundary, after any
    /// delivery in progress completes.
    pub async fn run_stream(
        &self,
        params: StartNotificationStreamParams,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> Result<CallToolResult, McpError> {
        let request = self.stream_settings.request(params.interval, params.count);

        info!(
            "Starting notification stream: interval={}ms, count={}{}",
            request.interval_ms,
            request.count,
            if request.is_unbounded() {
                " (unbounded)"
            } else {
                ""
            }
        );

        let handle = NotificationEmitter::new(request).spawn(sink, cancel);
        let summary = handle.join().await.map_err(|e| {
            error!("Notification stream failed: {}", e);
            to_mcp_error(e)
        })?;

        if summary.cancelled {
            info!(
                "Notification stream cancelled after {} attempt(s): run_id={}",
                summary.attempted(),
                summary.run_id
            );
        } else {
            info!(
                "Notification stream completed: run_id={}, sent={}",
                summary.run_id, summary.sent
            );
        }
        if summary.failed > 0 {
            warn!(
                "{} notification(s) could not be delivered: run_id={}",
                summary.failed, summary.run_id
            );
        }

        Ok(CallToolResult::success(vec![Content::text(
            stream_started_message(request.interval_ms),
        )]))
    }

    /// All prompts as MCP prompt descriptors.
    pub fn prompt_list(&self) -> Result<Vec<Prompt>, McpError> {
        self.prompts.list().into_iter().map(to_model).collect()
    }

    /// Render a prompt by name.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<GetPromptResult, McpError> {
        let prompt = self.prompts.get(name).ok_or_else(|| {
            warn!("Prompt not found: {}", name);
            McpError::invalid_params(format!("Prompt '{name}' not found"), None)
        })?;

        let messages = prompt
            .render(&arguments.unwrap_or_default())
            .map_err(to_mcp_error)?;

        Ok(GetPromptResult {
            description: Some(prompt.description.to_string()),
            messages,
        })
    }

    /// All static resources as MCP resource descriptors.
    pub fn resource_list(&self) -> Result<Vec<Resource>, McpError> {
        self.resources.list().into_iter().map(to_model).collect()
    }

    /// Read a static resource by URI.
    pub fn read_static_resource(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let resource = self.resources.get(uri).ok_or_else(|| {
            warn!("Resource not found: {}", uri);
            McpError::invalid_params(format!("Resource '{uri}' not found"), None)
        })?;

        let contents = to_model(json!({
            "uri": resource.uri,
            "mimeType": resource.mime_type,
            "text": resource.text,
        }))?;

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

impl Default for StreamMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

// Implement the ServerHandler trait to define server capabilities
#[tool_handler]
impl rmcp::ServerHandler for StreamMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Stateless MCP server for testing notification delivery. \
                 Use start-notification-stream to receive periodic notifications, \
                 greeting-template for a sample prompt, and read the listed resource \
                 for a sample document."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_logging()
                .enable_prompts()
                .enable_resources()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        let prompts = self.prompt_list()?;
        debug!(count = prompts.len(), "list_prompts");
        Ok(ListPromptsResult::with_all_items(prompts))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!("Rendering prompt: name={}", request.name);
        self.render_prompt(&request.name, request.arguments)
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self.resource_list()?;
        debug!(count = resources.len(), "list_resources");
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!("Reading resource: uri={}", request.uri);
        self.read_static_resource(&request.uri)
    }

    async fn set_level(
        &self,
        request: SetLevelRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<(), McpError> {
        // Stream notifications are always sent at info; the request is only acknowledged
        info!("Client requested log level {:?}", request.level);
        Ok(())
    }
}
