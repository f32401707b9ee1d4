//! MCP command implementation.

use super::NhlServices;
use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;
use std::sync::Arc;

/// Run the MCP server.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let services = NhlServices::new(&settings)?;
    let server = McpServer::new(Arc::new(services.dispatcher()));
    server.run().await
}
