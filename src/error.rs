//! Error types for the Solafon MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Solafon MCP Server
#[derive(Error, Debug)]
pub enum SolafonMcpError {
    /// Solafon API errors
    #[error("Solafon API error: {0}")]
    Api(#[from] ApiError),

    /// Documentation and template catalog errors
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Solafon API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Response from {url} is not valid JSON ({status}): {message}")]
    InvalidResponse {
        url: String,
        status: u16,
        message: String,
    },
}

/// Catalog lookup errors
///
/// The display text always enumerates every valid key so a caller guessing
/// at keys is pointed at the full set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Topic \"{key}\" not found. Available topics: {}", .available.join(", "))]
    DocumentNotFound { key: String, available: Vec<String> },

    #[error("Template \"{key}\" not found. Available: {}", .available.join(", "))]
    TemplateNotFound { key: String, available: Vec<String> },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API base URL: {url} (must start with http:// or https://)")]
    InvalidBaseUrl { url: String },

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid parameter: {name} - {message}")]
    InvalidParameter { name: String, message: String },
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown resource: {uri}")]
    UnknownResource { uri: String },

    #[error("Unknown prompt: {name}")]
    UnknownPrompt { name: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },
}

/// Result type alias for Solafon MCP operations
pub type Result<T> = std::result::Result<T, SolafonMcpError>;

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (name, message) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let codes: Vec<_> = errs.iter().map(|e| e.code.to_string()).collect();
                (field.to_string(), format!("failed check: {}", codes.join(", ")))
            })
            .unwrap_or_else(|| ("arguments".to_string(), errors.to_string()));

        ValidationError::InvalidParameter { name, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_lists_every_key() {
        let err = CatalogError::DocumentNotFound {
            key: "nope".to_string(),
            available: vec!["introduction".to_string(), "quick-start".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Topic \"nope\" not found. Available topics: introduction, quick-start"
        );
    }

    #[test]
    fn test_catalog_error_is_not_prefixed() {
        let err: SolafonMcpError = CatalogError::TemplateNotFound {
            key: "x".to_string(),
            available: vec!["node-polling".to_string()],
        }
        .into();
        assert!(err.to_string().starts_with("Template \"x\" not found"));
    }

    #[test]
    fn test_error_conversion() {
        let err: SolafonMcpError = ConfigError::InvalidBaseUrl {
            url: "ftp://x".to_string(),
        }
        .into();
        assert!(matches!(err, SolafonMcpError::Config(_)));
        assert!(err.to_string().contains("ftp://x"));
    }
}
