//! MCP Tool definitions and handlers
//!
//! Defines all available tools and their implementations.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::api::client::ApiClient;
use crate::api::types::{BotCommand, HttpMethod, ProxyRequest, SendMessageRequest};
use crate::catalog::{Catalog, SearchHit, SearchOptions, SearchOutcome};
use crate::error::{Result, ValidationError};
use crate::mcp::types::{CallToolResult, Tool};

/// Arguments of `solafon_read_docs`
#[derive(Debug, Deserialize)]
struct ReadDocsArgs {
    topic: String,
}

/// Arguments of `solafon_search_docs`
#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDocsArgs {
    /// Search query (keyword or phrase)
    query: String,
}

/// Arguments of `solafon_set_webhook`
#[derive(Debug, Deserialize, JsonSchema, Validate)]
struct SetWebhookArgs {
    /// HTTPS webhook URL to receive message updates
    #[validate(url)]
    url: String,
}

/// Arguments of `solafon_set_commands`
#[derive(Debug, Deserialize, JsonSchema)]
struct SetCommandsArgs {
    /// Array of command objects
    commands: Vec<BotCommand>,
}

/// Arguments of `solafon_api_request`
#[derive(Debug, Deserialize, JsonSchema)]
struct ApiRequestArgs {
    /// HTTP method
    method: HttpMethod,

    /// API path starting with / (e.g. /apps, /bot/getMe)
    path: String,

    /// Request body as JSON object (for POST/PUT/PATCH)
    #[serde(default)]
    body: Option<Map<String, Value>>,

    /// Override token. Defaults to SOLAFON_BOT_TOKEN env var.
    #[serde(default)]
    token: Option<String>,
}

/// Arguments of `solafon_scaffold_bot`
#[derive(Debug, Deserialize)]
struct ScaffoldArgs {
    template: String,
}

/// Tool handler
pub struct ToolHandler {
    api_client: Arc<ApiClient>,
    catalog: Arc<Catalog>,
    search_options: SearchOptions,
}

impl ToolHandler {
    /// Create a new tool handler
    pub fn new(api_client: Arc<ApiClient>, catalog: Arc<Catalog>, search_options: SearchOptions) -> Self {
        Self {
            api_client,
            catalog,
            search_options,
        }
    }

    /// List all available tools
    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            tool_def("solafon_read_docs", "Read Solafon platform documentation by topic. Returns detailed documentation about a specific topic.", self.read_docs_schema()),
            tool_def("solafon_search_docs", "Search across all Solafon documentation for a keyword or phrase. Returns matching sections.", schema_of::<SearchDocsArgs>()),
            tool_def("solafon_list_docs", "List all available Solafon documentation topics.", empty_schema()),
            tool_def("solafon_get_bot_info", "Get information about your Solafon bot (id, title, username, webhook status). Requires SOLAFON_BOT_TOKEN.", empty_schema()),
            tool_def("solafon_send_message", "Send a message from your bot to a user on Solafon. Supports text, image, and button message types.", schema_of::<SendMessageRequest>()),
            tool_def("solafon_get_updates", "Get pending (unread) messages from users via long-polling. Messages are marked as read after retrieval.", empty_schema()),
            tool_def("solafon_set_webhook", "Set a webhook URL to receive messages in real-time. URL must be HTTPS.", schema_of::<SetWebhookArgs>()),
            tool_def("solafon_delete_webhook", "Remove the currently configured webhook. Switch back to polling mode.", empty_schema()),
            tool_def("solafon_get_webhook_info", "Get current webhook configuration including URL and pending update count.", empty_schema()),
            tool_def("solafon_set_commands", "Define bot commands. Commands with a 'response' field will auto-reply without hitting your server.", schema_of::<SetCommandsArgs>()),
            tool_def("solafon_get_commands", "Get all defined bot commands.", empty_schema()),
            tool_def("solafon_api_request", "Make a custom API request to any Solafon endpoint. Use for endpoints not covered by specific tools.", schema_of::<ApiRequestArgs>()),
            tool_def("solafon_health_check", "Check if the Solafon API is online and responding.", empty_schema()),
            tool_def("solafon_scaffold_bot", "Generate a bot code template for the Solafon platform. Choose language and architecture.", self.scaffold_schema()),
            tool_def("solafon_list_templates", "List all available bot code templates for scaffolding.", empty_schema()),
        ]
    }

    /// Call a tool by name
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        tracing::info!(tool = name, "tool call");

        match name {
            "solafon_read_docs" => self.handle_read_docs(args),
            "solafon_search_docs" => self.handle_search_docs(args),
            "solafon_list_docs" => self.handle_list_docs(),
            "solafon_get_bot_info" => render_remote(self.api_client.get_me().await),
            "solafon_send_message" => self.handle_send_message(args).await,
            "solafon_get_updates" => render_remote(self.api_client.get_updates().await),
            "solafon_set_webhook" => self.handle_set_webhook(args).await,
            "solafon_delete_webhook" => render_remote(self.api_client.delete_webhook().await),
            "solafon_get_webhook_info" => render_remote(self.api_client.get_webhook_info().await),
            "solafon_set_commands" => self.handle_set_commands(args).await,
            "solafon_get_commands" => render_remote(self.api_client.get_commands().await),
            "solafon_api_request" => self.handle_api_request(args).await,
            "solafon_health_check" => self.handle_health_check().await,
            "solafon_scaffold_bot" => self.handle_scaffold(args),
            "solafon_list_templates" => self.handle_list_templates(),
            _ => CallToolResult::error(format!("Unknown tool: {}", name)),
        }
    }

    // ==================== Documentation ====================

    fn handle_read_docs(&self, args: Value) -> CallToolResult {
        let args: ReadDocsArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        // An unknown topic is an answer, not a failure: the message lists every topic.
        match self.catalog.document(&args.topic) {
            Ok(doc) => CallToolResult::text(doc.content.clone()),
            Err(e) => CallToolResult::text(e.to_string()),
        }
    }

    fn handle_search_docs(&self, args: Value) -> CallToolResult {
        let args: SearchDocsArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        match self.catalog.search(&args.query, &self.search_options) {
            SearchOutcome::Matches(hits) => {
                let sections: Vec<String> = hits.iter().map(format_hit).collect();
                CallToolResult::text(format!(
                    "Found {} matching doc(s) for \"{}\":\n\n{}",
                    hits.len(),
                    args.query,
                    sections.join("\n\n---\n\n")
                ))
            }
            SearchOutcome::NoResults => CallToolResult::text(format!(
                "No results found for \"{}\". Try different keywords or use solafon_read_docs to browse topics: {}",
                args.query,
                self.catalog.document_keys().join(", ")
            )),
        }
    }

    fn handle_list_docs(&self) -> CallToolResult {
        let list = self
            .catalog
            .documents()
            .iter()
            .map(|d| format!("- **{}**: {}", d.key, d.title))
            .collect::<Vec<_>>()
            .join("\n");

        CallToolResult::text(format!(
            "# Available Documentation Topics\n\n{}\n\nUse `solafon_read_docs` with a topic key to read the full documentation.",
            list
        ))
    }

    // ==================== Bot API ====================

    async fn handle_send_message(&self, args: Value) -> CallToolResult {
        let message: SendMessageRequest = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        render_remote(self.api_client.send_message(&message).await)
    }

    async fn handle_set_webhook(&self, args: Value) -> CallToolResult {
        let args: SetWebhookArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        if let Err(e) = args.validate() {
            return CallToolResult::error(ValidationError::from(e).to_string());
        }

        render_remote(self.api_client.set_webhook(&args.url).await)
    }

    async fn handle_set_commands(&self, args: Value) -> CallToolResult {
        let args: SetCommandsArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        render_remote(self.api_client.set_commands(&args.commands).await)
    }

    // ==================== Development Helpers ====================

    async fn handle_api_request(&self, args: Value) -> CallToolResult {
        let args: ApiRequestArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        let request = ProxyRequest {
            method: args.method,
            path: args.path,
            body: args.body,
            token: args.token,
        };

        render_remote(self.api_client.request(request).await)
    }

    async fn handle_health_check(&self) -> CallToolResult {
        match self.api_client.health_check().await {
            Ok(status) => CallToolResult::text(format!(
                "API Status: {}\n{}",
                if status.online { "Online" } else { "Error" },
                pretty(&status.body)
            )),
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                CallToolResult::text(format!("API Status: Offline\nError: {}", e))
            }
        }
    }

    fn handle_scaffold(&self, args: Value) -> CallToolResult {
        let args: ScaffoldArgs = match parse_args(args) {
            Ok(a) => a,
            Err(e) => return e,
        };

        match self.catalog.template(&args.template) {
            Ok(t) => CallToolResult::text(format!(
                "# {}\n\n{}\n\n```{}\n{}```",
                t.title, t.description, t.language, t.code
            )),
            Err(e) => CallToolResult::text(e.to_string()),
        }
    }

    fn handle_list_templates(&self) -> CallToolResult {
        let list = self
            .catalog
            .templates()
            .iter()
            .map(|t| format!("- **{}** ({}): {} — {}", t.key, t.language, t.title, t.description))
            .collect::<Vec<_>>()
            .join("\n");

        CallToolResult::text(format!(
            "# Available Bot Templates\n\n{}\n\nUse `solafon_scaffold_bot` with a template key to generate the code.",
            list
        ))
    }

    // ==================== Schemas ====================

    fn read_docs_schema(&self) -> Value {
        let topics = self
            .catalog
            .documents()
            .iter()
            .map(|d| format!("{} ({})", d.key, d.title))
            .collect::<Vec<_>>()
            .join(", ");

        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "enum": self.catalog.document_keys(),
                    "description": format!("Documentation topic. Available: {}", topics)
                }
            },
            "required": ["topic"]
        })
    }

    fn scaffold_schema(&self) -> Value {
        let templates = self
            .catalog
            .templates()
            .iter()
            .map(|t| format!("{} ({})", t.key, t.title))
            .collect::<Vec<_>>()
            .join(", ");

        json!({
            "type": "object",
            "properties": {
                "template": {
                    "type": "string",
                    "enum": self.catalog.template_keys(),
                    "description": format!("Template name. Available: {}", templates)
                }
            },
            "required": ["template"]
        })
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> std::result::Result<T, CallToolResult> {
    // Tools without parameters may be called with `null` arguments.
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| CallToolResult::error(format!("Invalid arguments: {}", e)))
}

/// Render a forwarded API response, or the transport failure
fn render_remote(result: Result<Value>) -> CallToolResult {
    match result {
        Ok(data) => CallToolResult::text(pretty(&data)),
        Err(e) => {
            tracing::warn!(error = %e, "API request failed");
            CallToolResult::error(e.to_string())
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn format_hit(hit: &SearchHit) -> String {
    let windows = hit
        .windows
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join("\n---\n");
    format!("## {} (topic: \"{}\")\n{}", hit.title, hit.key, windows)
}

fn tool_def(name: &str, description: &str, input_schema: Value) -> Tool {
    Tool {
        name: name.to_string(),
        description: Some(description.to_string()),
        input_schema,
    }
}

fn empty_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| empty_schema())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn handler() -> ToolHandler {
        let config = Config::new("http://127.0.0.1:1/api/v1", None).unwrap();
        ToolHandler::new(
            Arc::new(ApiClient::new(&config)),
            Arc::new(Catalog::builtin(&config)),
            config.search,
        )
    }

    #[test]
    fn test_tool_names_are_unique() {
        let mut names: Vec<_> = handler().list_tools().into_iter().map(|t| t.name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 15);
    }

    #[test]
    fn test_read_docs_schema_lists_topics() {
        let schema = handler().read_docs_schema();
        let topics = schema["properties"]["topic"]["enum"].as_array().unwrap();
        assert!(topics.contains(&json!("quick-start")));
    }

    #[test]
    fn test_derived_schema_has_properties() {
        let schema = schema_of::<ApiRequestArgs>();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["method"].is_object());
        assert!(schema["properties"]["path"].is_object());
    }

    #[test]
    fn test_format_hit() {
        let hit = SearchHit {
            key: "k".to_string(),
            title: "T".to_string(),
            windows: vec![
                crate::catalog::ContextWindow {
                    start_line: 0,
                    end_line: 0,
                    text: "a".to_string(),
                },
                crate::catalog::ContextWindow {
                    start_line: 1,
                    end_line: 1,
                    text: "b".to_string(),
                },
            ],
        };
        assert_eq!(format_hit(&hit), "## T (topic: \"k\")\na\n---\nb");
    }

    #[tokio::test]
    async fn test_invalid_webhook_url() {
        let result = handler()
            .call_tool("solafon_set_webhook", json!({"url": "not a url"}))
            .await;
        assert!(result.is_error);
        assert!(result.text_content().contains("url"));
    }

    #[tokio::test]
    async fn test_unknown_method_rejected() {
        let result = handler()
            .call_tool("solafon_api_request", json!({"method": "HEAD", "path": "/x"}))
            .await;
        assert!(result.is_error);
        assert!(result.text_content().starts_with("Error: Invalid arguments"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = handler().call_tool("nope", json!({})).await;
        assert!(result.is_error);
    }
}
