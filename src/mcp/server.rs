//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.
//! Messages are newline-delimited JSON-RPC and are handled one at a time,
//! each to completion, in arrival order.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::api::client::ApiClient;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Result, SolafonMcpError};
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;
use crate::mcp::{prompts, resources};

/// MCP Server info
const SERVER_NAME: &str = "solafon";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTRUCTIONS: &str = "Tools for building Solafon mini-apps and bots. Documentation tools \
(solafon_list_docs, solafon_read_docs, solafon_search_docs) and templates \
(solafon_list_templates, solafon_scaffold_bot) work offline. Bot API tools call the Solafon API \
and return its JSON response unchanged; they need SOLAFON_BOT_TOKEN or an explicit token.";

/// MCP Server for the Solafon platform
pub struct McpServer {
    /// Documentation and templates
    catalog: Arc<Catalog>,

    /// Tool handler
    tool_handler: ToolHandler,

    /// Whether initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server from startup configuration
    pub fn new(config: &Config) -> Self {
        let api_client = Arc::new(ApiClient::new(config));
        let catalog = Arc::new(Catalog::builtin(config));
        Self::with_parts(api_client, catalog, config)
    }

    /// Create a server around an existing client and catalog
    pub fn with_parts(api_client: Arc<ApiClient>, catalog: Arc<Catalog>, config: &Config) -> Self {
        let tool_handler = ToolHandler::new(api_client, catalog.clone(), config.search);

        Self {
            catalog,
            tool_handler,
            initialized: false,
        }
    }

    /// Whether the client has sent `notifications/initialized`
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server on stdio
    pub async fn run_stdio(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run(stdin, stdout).await
    }

    /// Serve requests from `reader` until EOF, writing responses to `writer`
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_message(&line).await {
                Ok(Some(response)) => {
                    let mut response_str = serde_json::to_string(&response)?;
                    response_str.push('\n');
                    writer.write_all(response_str.as_bytes()).await?;
                    writer.flush().await?;
                }
                Ok(None) => {
                    // Notification, no response needed
                }
                Err(e) => {
                    tracing::error!(error = %e, "error handling message");
                }
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    pub async fn handle_message(&mut self, message: &str) -> Result<Option<JsonRpcResponse>> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                return Ok(Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(e.to_string()),
                )));
            }
        };

        tracing::debug!(method = %request.method, "request received");

        if request.is_notification() {
            if request.method == methods::INITIALIZED {
                self.initialized = true;
            }
            return Ok(None);
        }

        let id = request.id.clone();
        let outcome = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(),
            methods::PING => Ok(serde_json::json!({})),
            methods::LIST_TOOLS => self.handle_list_tools(),
            methods::CALL_TOOL => self.handle_call_tool(&request).await,
            methods::LIST_RESOURCES => self.handle_list_resources(),
            methods::READ_RESOURCE => self.handle_read_resource(&request),
            methods::LIST_PROMPTS => self.handle_list_prompts(),
            methods::GET_PROMPT => self.handle_get_prompt(&request),
            _ => {
                return Ok(Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(&request.method),
                )))
            }
        };

        Ok(Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => JsonRpcResponse::error(id, rpc_error(&e)),
        }))
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {}),
                resources: Some(ResourcesCapability::default()),
                prompts: Some(PromptsCapability::default()),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.tool_handler.list_tools(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request
    ///
    /// Tool failures are reported inside the result (`isError`), never as
    /// JSON-RPC errors.
    async fn handle_call_tool(&self, request: &JsonRpcRequest) -> Result<Value> {
        let result = match params::<CallToolParams>(request) {
            Ok(params) => self.tool_handler.call_tool(&params.name, params.arguments).await,
            Err(e) => CallToolResult::error(format!("Invalid tool parameters: {}", e)),
        };

        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_resources(&self) -> Result<Value> {
        let result = ListResourcesResult {
            resources: resources::list_resources(&self.catalog),
        };

        Ok(serde_json::to_value(result)?)
    }

    fn handle_read_resource(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params: ReadResourceParams = params(request)?;
        let result = resources::read_resource(&self.catalog, &params.uri)?;

        Ok(serde_json::to_value(result)?)
    }

    fn handle_list_prompts(&self) -> Result<Value> {
        let result = ListPromptsResult {
            prompts: prompts::list_prompts(),
        };

        Ok(serde_json::to_value(result)?)
    }

    fn handle_get_prompt(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params: GetPromptParams = params(request)?;
        let result = prompts::get_prompt(&params.name, &params.arguments)?;

        Ok(serde_json::to_value(result)?)
    }
}

/// Deserialize request params, treating absent params as an error
fn params<T: DeserializeOwned>(request: &JsonRpcRequest) -> Result<T> {
    let value = request.params.clone().ok_or_else(|| {
        crate::error::McpError::InvalidParams {
            message: "Missing parameters".to_string(),
        }
    })?;

    serde_json::from_value(value).map_err(|e| {
        crate::error::McpError::InvalidParams {
            message: e.to_string(),
        }
        .into()
    })
}

fn rpc_error(err: &SolafonMcpError) -> JsonRpcError {
    match err {
        SolafonMcpError::Mcp(_) | SolafonMcpError::Catalog(_) | SolafonMcpError::Validation(_) => {
            JsonRpcError::invalid_params(err.to_string())
        }
        _ => JsonRpcError::internal_error(err.to_string()),
    }
}
