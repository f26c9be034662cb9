//! Solafon API type definitions
//!
//! Request-side types only. Responses are forwarded as raw JSON so the
//! remote envelope (`ok`/`error_code`/`description` or `data`/`error`)
//! reaches the caller exactly as the service sent it.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// HTTP verbs accepted by the proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Whether a request body is sent with this method
    pub fn carries_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single outbound call to the Solafon API
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyRequest {
    pub method: HttpMethod,

    /// Appended verbatim to the base URL
    pub path: String,

    /// JSON body; only sent for POST, PUT and PATCH
    pub body: Option<Map<String, Value>>,

    /// Per-call token overriding the configured default
    pub token: Option<String>,
}

impl ProxyRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }
}

/// Bot message kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Button,
}

/// Body of `POST /bot/sendMessage`
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SendMessageRequest {
    /// User ID to send the message to
    pub chat_id: i64,

    /// Message text content
    pub text: String,

    /// Message type: text (default), image, or button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,

    /// JSON string with extra data. For images: {"image_url": "..."}, for buttons: {"buttons": [{"text": "...", "action": "..."}]}
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

/// A bot command definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BotCommand {
    /// Command name without / prefix (e.g. 'help')
    pub command: String,

    /// Short description of the command
    pub description: String,

    /// Auto-reply text. If set, Solafon responds automatically without webhook/polling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Result of probing the health endpoint
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Whether the endpoint answered with a 2xx status
    pub online: bool,

    /// Parsed response body
    pub body: Value,
}
