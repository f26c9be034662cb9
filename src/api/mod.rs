//! Solafon API module
//!
//! Contains the request types and the pass-through HTTP client.

pub mod client;
pub mod types;
