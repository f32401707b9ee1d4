//! MCP (Model Context Protocol) server for Statline.
//!
//! Lets external AI assistants call the player stats tools.
//! Implements JSON-RPC 2.0 over stdio.

mod protocol;
mod server;

pub use server::McpServer;
