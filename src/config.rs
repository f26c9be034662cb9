//! Configuration management for the Solafon MCP Server
//!
//! Configuration is read once at startup and passed explicitly to the API
//! client and the catalog. Nothing reads the environment after that.

use crate::catalog::search::SearchOptions;
use crate::error::{ConfigError, Result};

/// Default base URL of the Solafon REST API
pub const DEFAULT_API_BASE_URL: &str = "https://api.solafon.com/api/v1";

/// Environment variable names
pub mod env {
    pub const API_URL: &str = "SOLAFON_API_URL";
    pub const BOT_TOKEN: &str = "SOLAFON_BOT_TOKEN";
    pub const SEARCH_LINES_BEFORE: &str = "SOLAFON_SEARCH_LINES_BEFORE";
    pub const SEARCH_LINES_AFTER: &str = "SOLAFON_SEARCH_LINES_AFTER";
    pub const SEARCH_MAX_WINDOWS: &str = "SOLAFON_SEARCH_MAX_WINDOWS";
}

/// Configuration for the Solafon MCP Server
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL that request paths are appended to
    pub api_base_url: String,

    /// Default bearer token used when a call does not supply its own
    pub bot_token: Option<String>,

    /// Context window settings for documentation search
    pub search: SearchOptions,
}

impl Config {
    /// Create a configuration from explicit values
    pub fn new(api_base_url: impl Into<String>, bot_token: Option<String>) -> Result<Self> {
        let api_base_url = api_base_url.into();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl { url: api_base_url }.into());
        }

        Ok(Self {
            api_base_url,
            bot_token: bot_token.filter(|t| !t.is_empty()),
            search: SearchOptions::default(),
        })
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(env::API_URL)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let mut config = Self::new(base_url, lookup(env::BOT_TOKEN))?;

        let defaults = SearchOptions::default();
        config.search = SearchOptions {
            lines_before: parse_usize(&lookup, env::SEARCH_LINES_BEFORE, defaults.lines_before)?,
            lines_after: parse_usize(&lookup, env::SEARCH_LINES_AFTER, defaults.lines_after)?,
            max_windows: parse_usize(&lookup, env::SEARCH_MAX_WINDOWS, defaults.max_windows)?,
        };

        Ok(config)
    }

    /// Replace the base URL (CLI override)
    pub fn with_api_base_url(self, api_base_url: impl Into<String>) -> Result<Self> {
        let search = self.search;
        let mut config = Self::new(api_base_url, self.bot_token)?;
        config.search = search;
        Ok(config)
    }

    /// Replace the default token (CLI override)
    pub fn with_bot_token(mut self, bot_token: impl Into<String>) -> Self {
        let token = bot_token.into();
        self.bot_token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Whether a default bearer token is configured
    pub fn has_token(&self) -> bool {
        self.bot_token.is_some()
    }

    /// URL of the service health endpoint, which sits outside the versioned API prefix
    ///
    /// The first `/api/v1` anywhere in the base URL is removed.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_base_url.replacen("/api/v1", "", 1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bot_token: None,
            search: SearchOptions::default(),
        }
    }
}

fn parse_usize<F>(lookup: &F, var: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };

    match value.trim().parse::<usize>() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }
        .into()),
    }
}
