//! Built-in documentation and template tables
//!
//! The text itself lives under `content/` and is compiled into the binary.

/// Placeholder in document text replaced by the configured API base URL
pub const API_BASE_URL_PLACEHOLDER: &str = "{{API_BASE_URL}}";

/// A raw documentation entry: key, title, markdown content
pub(crate) struct DocSource {
    pub key: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

/// A raw template entry
pub(crate) struct TemplateSource {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub language: &'static str,
    pub code: &'static str,
}

pub(crate) const DOCS: &[DocSource] = &[
    DocSource {
        key: "introduction",
        title: "Introduction to Solafon",
        content: include_str!("../../content/docs/introduction.md"),
    },
    DocSource {
        key: "quick-start",
        title: "Quick Start Guide",
        content: include_str!("../../content/docs/quick-start.md"),
    },
    DocSource {
        key: "authentication",
        title: "Authentication",
        content: include_str!("../../content/docs/authentication.md"),
    },
    DocSource {
        key: "bot-api",
        title: "Bot API Reference",
        content: include_str!("../../content/docs/bot-api.md"),
    },
    DocSource {
        key: "app-management",
        title: "App Management API",
        content: include_str!("../../content/docs/app-management.md"),
    },
    DocSource {
        key: "dev-studio",
        title: "Dev Studio Guide",
        content: include_str!("../../content/docs/dev-studio.md"),
    },
    DocSource {
        key: "webhooks-guide",
        title: "Webhooks Integration Guide",
        content: include_str!("../../content/docs/webhooks-guide.md"),
    },
    DocSource {
        key: "message-types",
        title: "Message Types",
        content: include_str!("../../content/docs/message-types.md"),
    },
    DocSource {
        key: "mana-points",
        title: "Mana Points System",
        content: include_str!("../../content/docs/mana-points.md"),
    },
    DocSource {
        key: "api-overview",
        title: "API Overview",
        content: include_str!("../../content/docs/api-overview.md"),
    },
    DocSource {
        key: "code-examples",
        title: "Code Examples",
        content: include_str!("../../content/docs/code-examples.md"),
    },
    DocSource {
        key: "project-architecture",
        title: "Project Architecture",
        content: include_str!("../../content/docs/project-architecture.md"),
    },
    DocSource {
        key: "secret-login",
        title: "Secret Login",
        content: include_str!("../../content/docs/secret-login.md"),
    },
    DocSource {
        key: "mcp-setup",
        title: "MCP Server Setup",
        content: include_str!("../../content/docs/mcp-setup.md"),
    },
];

pub(crate) const TEMPLATES: &[TemplateSource] = &[
    TemplateSource {
        key: "node-polling",
        title: "Node.js Polling Bot",
        description: "Simple polling bot using Node.js with message handling",
        language: "javascript",
        code: include_str!("../../content/templates/node-polling.js"),
    },
    TemplateSource {
        key: "node-webhook",
        title: "Node.js Webhook Bot",
        description: "Express.js webhook bot with command handling",
        language: "javascript",
        code: include_str!("../../content/templates/node-webhook.js"),
    },
    TemplateSource {
        key: "python-polling",
        title: "Python Polling Bot",
        description: "Simple Python polling bot with requests",
        language: "python",
        code: include_str!("../../content/templates/python-polling.py"),
    },
    TemplateSource {
        key: "python-webhook",
        title: "Python Webhook Bot",
        description: "Flask webhook bot with command handling",
        language: "python",
        code: include_str!("../../content/templates/python-webhook.py"),
    },
    TemplateSource {
        key: "go-webhook",
        title: "Go Webhook Bot",
        description: "Go webhook bot using net/http",
        language: "go",
        code: include_str!("../../content/templates/go-webhook.go"),
    },
    TemplateSource {
        key: "node-ai-bot",
        title: "AI Bot with OpenAI (Node.js)",
        description: "AI-powered bot using OpenAI GPT with conversation memory",
        language: "javascript",
        code: include_str!("../../content/templates/node-ai-bot.js"),
    },
];
