//! Agent command implementation.

use super::NhlServices;
use crate::agent::{tool_definitions, Agent, OpenAiModel};
use crate::cli::output::truncate;
use crate::cli::Output;
use crate::config::{Settings, Toolset};
use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run the agent command.
pub async fn run_agent(
    task: &str,
    context: Option<String>,
    model: Option<String>,
    max_iterations: Option<usize>,
    toolset: Option<Toolset>,
    settings: Settings,
) -> Result<()> {
    if settings.agent.api_base.is_none() && std::env::var("OPENAI_API_KEY").is_err() {
        Output::error("OPENAI_API_KEY is not set.");
        anyhow::bail!("OPENAI_API_KEY environment variable is required for the agent");
    }

    let services = NhlServices::new(&settings)?;
    let toolset = toolset.unwrap_or(settings.agent.toolset);
    let tools = tool_definitions(toolset)?;

    let mut client = OpenAiModel::new(&settings.agent)?;
    if let Some(model) = &model {
        client = client.with_model(model);
    }

    let agent = Agent::new(Arc::new(client), Arc::new(services.dispatcher()), tools)
        .with_max_iterations(max_iterations.unwrap_or(settings.agent.max_iterations));

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupt received, cancelling agent");
                cancel.cancel();
            }
        })
    };

    let spinner = Output::spinner(&format!("Agent working ({} tools)...", toolset));
    let result = agent
        .run_with_cancellation(task, context.as_deref(), &cancel)
        .await;
    spinner.finish_and_clear();
    ctrl_c.abort();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    let line = truncate(&call.to_string(), 72);
                    if call.is_error {
                        Output::warning(&line);
                    } else {
                        Output::list_item(&line);
                    }
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Agent failed: {}", e));
            Err(e.into())
        }
    }
}
