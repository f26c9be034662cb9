//! MCP (Model Context Protocol) module
//!
//! Implements the MCP server protocol for tool invocation, resources and prompts.

pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;
pub mod types;
