//! Guided prompts
//!
//! Canned multi-step instructions that walk the assistant through the tools.

use serde_json::{Map, Value};

use crate::error::{McpError, Result};
use crate::mcp::types::{GetPromptResult, Prompt, PromptArgument, PromptMessage, ToolResultContent};

pub const CREATE_BOT: &str = "create-solafon-bot";
pub const DEBUG_BOT: &str = "debug-solafon-bot";
pub const API_EXPLORER: &str = "solafon-api-explorer";

/// Available prompts
pub fn list_prompts() -> Vec<Prompt> {
    vec![
        Prompt {
            name: CREATE_BOT.to_string(),
            description: Some("Step-by-step guide to create a new bot on the Solafon platform".to_string()),
            arguments: vec![
                argument("language", "Programming language for the bot: javascript, python or go"),
                argument("architecture", "Message delivery: polling or webhook"),
            ],
        },
        Prompt {
            name: DEBUG_BOT.to_string(),
            description: Some("Debug issues with your Solafon bot".to_string()),
            arguments: vec![argument("issue", "Description of the issue")],
        },
        Prompt {
            name: API_EXPLORER.to_string(),
            description: Some("Explore the Solafon API interactively".to_string()),
            arguments: vec![],
        },
    ]
}

/// Render a prompt with its arguments
pub fn get_prompt(name: &str, arguments: &Map<String, Value>) -> Result<GetPromptResult> {
    let text = match name {
        CREATE_BOT => {
            let language = one_of(arguments, "language", &["javascript", "python", "go"])?;
            let architecture = one_of(arguments, "architecture", &["polling", "webhook"])?;
            create_bot_text(language, architecture)
        }
        DEBUG_BOT => debug_bot_text(string_arg(arguments, "issue")),
        API_EXPLORER => API_EXPLORER_TEXT.to_string(),
        _ => {
            return Err(McpError::UnknownPrompt {
                name: name.to_string(),
            }
            .into())
        }
    };

    let description = list_prompts()
        .into_iter()
        .find(|p| p.name == name)
        .and_then(|p| p.description);

    Ok(GetPromptResult {
        description,
        messages: vec![PromptMessage {
            role: "user".to_string(),
            content: ToolResultContent::Text { text },
        }],
    })
}

fn argument(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: Some(description.to_string()),
        required: false,
    }
}

fn string_arg<'a>(arguments: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    arguments
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn one_of<'a>(arguments: &'a Map<String, Value>, name: &str, allowed: &[&str]) -> Result<Option<&'a str>> {
    match string_arg(arguments, name) {
        Some(value) if !allowed.contains(&value) => Err(McpError::InvalidParams {
            message: format!("{} must be one of: {}", name, allowed.join(", ")),
        }
        .into()),
        other => Ok(other),
    }
}

fn create_bot_text(language: Option<&str>, architecture: Option<&str>) -> String {
    let delivery = if architecture == Some("webhook") {
        "a webhook using solafon_set_webhook"
    } else {
        "polling to receive messages"
    };

    format!(
        "Help me create a new Solafon bot using {} with {} architecture.

Here's what I need:
1. First, use solafon_read_docs with topic \"quick-start\" to understand the setup process
2. Use solafon_scaffold_bot to generate a starter template
3. Set up bot commands using solafon_set_commands
4. Configure {}
5. Test the bot by sending a test message

Guide me through each step with explanations.",
        language.unwrap_or("any language"),
        architecture.unwrap_or("your recommended"),
        delivery
    )
}

fn debug_bot_text(issue: Option<&str>) -> String {
    let issue = issue.map(|i| format!("Issue: {}", i)).unwrap_or_default();

    format!(
        "Help me debug my Solafon bot. {}

Please:
1. Check if the API is online using solafon_health_check
2. Verify my bot token with solafon_get_bot_info
3. Check webhook configuration with solafon_get_webhook_info
4. Check for pending messages with solafon_get_updates
5. Review my bot commands with solafon_get_commands

Based on the results, diagnose the issue and suggest fixes.",
        issue
    )
}

const API_EXPLORER_TEXT: &str = "I want to explore the Solafon API. Please:
1. Show me the available documentation topics using solafon_list_docs
2. Let me know what tools are available for interacting with the API
3. Show me available bot templates using solafon_list_templates

Then ask me what I'd like to do: create a bot, explore endpoints, or learn about a specific feature.";
