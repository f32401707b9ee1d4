//! Tools command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::schema::{self, NHL_OPENAPI_DOCUMENT};
use anyhow::{Context, Result};

/// Generate tool definitions from an OpenAPI document and print them.
pub fn run_tools(file: Option<&str>) -> Result<()> {
    let document = match file {
        Some(path) => {
            let path = Settings::expand_path(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => NHL_OPENAPI_DOCUMENT.to_string(),
    };

    let tools = schema::generate(&document)?;
    if tools.is_empty() {
        Output::warning("No operations found in the document.");
        return Ok(());
    }

    Output::info(&format!("{} tool(s)", tools.len()));
    for tool in &tools {
        Output::tool(tool);
    }
    println!();
    Ok(())
}
