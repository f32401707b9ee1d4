//! Agent system for answering questions with tool calling.
//!
//! The [`Agent`] drives a conversation with a [`ModelClient`], executing at
//! most one requested tool per model turn through the [`ToolDispatcher`]
//! until the model produces a final answer.

mod model;
mod openai_model;
mod runner;
mod tools;

pub use model::{Conversation, ModelClient, ModelReply, Role, StopReason, ToolUse, Turn};
pub use openai_model::{to_openai_tool, OpenAiModel};
pub use runner::{Agent, AgentResponse, ToolCallRecord, DEFAULT_MAX_ITERATIONS};
pub use tools::{
    curated_tools, parse_tool_call, tool_definitions, ToolCall, ToolDispatcher,
    ToolInvocationResult, TOOL_NAMES,
};
