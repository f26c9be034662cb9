//! Solafon MCP Server Library
//!
//! A Model Context Protocol (MCP) server for the Solafon platform.
//! Serves platform documentation and bot templates, and proxies Bot API
//! calls to the Solafon REST API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mcp;

pub use config::Config;
pub use error::{Result, SolafonMcpError};
