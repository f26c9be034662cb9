//! Solafon MCP Server - Rust Implementation
//!
//! A Model Context Protocol (MCP) server for building Solafon mini-apps and bots.
//! Provides documentation, code templates, and Bot API access over stdio.

use anyhow::Context;
use clap::{Parser, Subcommand};

use solafon_mcp_server::api::client::ApiClient;
use solafon_mcp_server::config::Config;
use solafon_mcp_server::mcp::server::McpServer;

/// Solafon MCP Server
#[derive(Parser)]
#[command(name = "solafon-mcp")]
#[command(author, version, about = "Solafon MCP Server - A Model Context Protocol server for the Solafon platform")]
struct Cli {
    /// API base URL (overrides SOLAFON_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Default bot token (overrides SOLAFON_BOT_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the Solafon API is reachable, then exit
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config = config
            .with_api_base_url(url)
            .context("invalid --api-url")?;
    }
    if let Some(token) = cli.token {
        config = config.with_bot_token(token);
    }

    tracing::info!(
        api_url = %config.api_base_url,
        token_configured = config.has_token(),
        "configuration loaded"
    );

    match cli.command {
        Some(Commands::Check) => check(&config).await,
        None => {
            let mut server = McpServer::new(&config);
            tracing::info!("Solafon MCP server running on stdio");
            server.run_stdio().await.context("MCP server failed")
        }
    }
}

async fn check(config: &Config) -> anyhow::Result<()> {
    let client = ApiClient::new(config);
    let status = client
        .health_check()
        .await
        .with_context(|| format!("API at {} is offline", config.health_url()))?;

    eprintln!(
        "API Status: {}\n{}",
        if status.online { "Online" } else { "Error" },
        serde_json::to_string_pretty(&status.body)?
    );

    if !status.online {
        anyhow::bail!("health endpoint returned an error status");
    }
    Ok(())
}
