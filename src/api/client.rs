//! Solafon API client
//!
//! Every call is one HTTP round-trip. The response body is parsed as JSON
//! and handed back untouched, whatever the status code; interpreting the
//! remote envelope is left to the caller.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Map, Value};

use crate::api::types::*;
use crate::config::Config;
use crate::error::{ApiError, Result, ValidationError};

/// Solafon API client
pub struct ApiClient {
    /// HTTP client
    http_client: reqwest::Client,

    /// Base URL that paths are appended to
    base_url: String,

    /// Token used when a call carries none
    default_token: Option<String>,

    /// Health endpoint URL
    health_url: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &Config) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
            default_token: config.bot_token.clone(),
            health_url: config.health_url(),
        }
    }

    /// Pick the bearer token for a call: explicit, then default, then none
    pub fn resolve_token<'a>(&'a self, per_call: Option<&'a str>) -> Option<&'a str> {
        per_call
            .filter(|t| !t.is_empty())
            .or(self.default_token.as_deref())
    }

    /// Send one request and return the parsed response body
    pub async fn request(&self, request: ProxyRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .http_client
            .request(request.method.into(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.resolve_token(request.token.as_deref()) {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        match request.body {
            Some(body) if request.method.carries_body() => {
                builder = builder.body(serde_json::to_vec(&body)?);
            }
            Some(_) => {
                tracing::debug!(method = %request.method, path = %request.path, "dropping body for method without payload");
            }
            None => {}
        }

        tracing::debug!(method = %request.method, %url, "sending API request");

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "API response received");

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse {
                url,
                status: status.as_u16(),
                message: e.to_string(),
            }
            .into()
        })
    }

    // ==================== Bot API ====================

    /// Get bot identity and webhook status
    pub async fn get_me(&self) -> Result<Value> {
        self.request(ProxyRequest::get("/bot/getMe")).await
    }

    /// Send a message to a user
    pub async fn send_message(&self, message: &SendMessageRequest) -> Result<Value> {
        self.request(ProxyRequest::post("/bot/sendMessage").with_body(to_object(message)?))
            .await
    }

    /// Fetch pending messages
    pub async fn get_updates(&self) -> Result<Value> {
        self.request(ProxyRequest::get("/bot/getUpdates")).await
    }

    /// Register a webhook URL
    pub async fn set_webhook(&self, url: &str) -> Result<Value> {
        self.request(ProxyRequest::post("/bot/setWebhook").with_body(to_object(&json!({ "url": url }))?))
            .await
    }

    /// Remove the webhook, switching back to polling
    pub async fn delete_webhook(&self) -> Result<Value> {
        self.request(ProxyRequest::post("/bot/deleteWebhook")).await
    }

    /// Get the current webhook configuration
    pub async fn get_webhook_info(&self) -> Result<Value> {
        self.request(ProxyRequest::get("/bot/getWebhookInfo")).await
    }

    /// Replace the bot's command list
    pub async fn set_commands(&self, commands: &[BotCommand]) -> Result<Value> {
        self.request(
            ProxyRequest::post("/bot/setMyCommands")
                .with_body(to_object(&json!({ "commands": commands }))?),
        )
        .await
    }

    /// Get the bot's command list
    pub async fn get_commands(&self) -> Result<Value> {
        self.request(ProxyRequest::get("/bot/getMyCommands")).await
    }

    // ==================== Health ====================

    /// Probe the unauthenticated health endpoint
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let response = self.http_client.get(&self.health_url).send().await?;
        let online = response.status().is_success();
        let body = response.json().await?;

        Ok(HealthStatus { online, body })
    }
}

fn to_object<T: serde::Serialize>(value: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::InvalidParameter {
            name: "body".to_string(),
            message: "request body must be a JSON object".to_string(),
        }
        .into()),
    }
}
