//! Agent runner with tool calling loop.

use super::model::{Conversation, ModelClient, ModelReply, StopReason};
use super::tools::ToolDispatcher;
use crate::error::{Result, StatlineError};
use crate::schema::ToolDefinition;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default cap on model calls per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Agent that answers questions by calling tools.
pub struct Agent {
    model: Arc<dyn ModelClient>,
    dispatcher: Arc<ToolDispatcher>,
    tools: Vec<ToolDefinition>,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent advertising `tools` to the model.
    pub fn new(
        model: Arc<dyn ModelClient>,
        dispatcher: Arc<ToolDispatcher>,
        tools: Vec<ToolDefinition>,
    ) -> Self {
        Self {
            model,
            dispatcher,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Tools advertised to the model.
    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Run the agent with a user task.
    pub async fn run(&self, task: &str, context: Option<&str>) -> Result<AgentResponse> {
        self.run_with_cancellation(task, context, &CancellationToken::new())
            .await
    }

    /// Run the agent, stopping early if `cancel` fires.
    ///
    /// Cancellation is observed before each model call and before each tool
    /// execution; a running tool always finishes and its turns are recorded
    /// together.
    pub async fn run_with_cancellation(
        &self,
        task: &str,
        context: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<AgentResponse> {
        let user_message = match context {
            Some(ctx) => format!("Context: {}\n\nTask: {}", ctx, task),
            None => task.to_string(),
        };

        let mut conversation = Conversation::new(user_message);
        let mut iterations = 0;
        let mut tool_calls = Vec::new();

        loop {
            if cancel.is_cancelled() {
                return Err(StatlineError::Cancelled);
            }

            iterations += 1;
            if iterations > self.max_iterations {
                return Err(StatlineError::AgentLoopExceeded(self.max_iterations));
            }

            debug!("Agent iteration {}", iterations);

            let reply = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(StatlineError::Cancelled),
                reply = self.model.complete(&conversation, &self.tools) => reply?,
            };

            let ModelReply {
                stop_reason,
                text,
                tool_uses,
            } = reply;

            if stop_reason != StopReason::ToolUse || tool_uses.is_empty() {
                return Ok(AgentResponse {
                    content: text.unwrap_or_default(),
                    conversation,
                    tool_calls,
                    iterations,
                });
            }

            if tool_uses.len() > 1 {
                warn!(
                    "Model requested {} tools in one turn; only the first is executed",
                    tool_uses.len()
                );
            }

            let Some(tool_use) = tool_uses.into_iter().next() else {
                continue;
            };

            if cancel.is_cancelled() {
                return Err(StatlineError::Cancelled);
            }

            info!("Agent calling tool: {} with args: {}", tool_use.name, tool_use.input);
            let result = self
                .dispatcher
                .dispatch(&tool_use.name, &tool_use.input)
                .await;
            debug!("Tool result: {}", preview(&result.content, 100));

            tool_calls.push(ToolCallRecord {
                name: tool_use.name.clone(),
                arguments: tool_use.input.to_string(),
                result: result.content.clone(),
                is_error: result.is_error,
            });
            conversation.append_exchange(text, tool_use, result);
        }
    }
}

fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// History up to, but not including, the final answer.
    pub conversation: Conversation,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
    pub is_error: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
