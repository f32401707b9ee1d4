//! Conversation state and the model interface.

use super::tools::ToolInvocationResult;
use crate::error::Result;
use crate::schema::ToolDefinition;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// A model's request to invoke a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolUse {
    /// Provider-assigned id, echoed back in the tool result.
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    ToolResult,
}

/// One entry in the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Turn {
    User {
        text: String,
    },
    Assistant {
        text: Option<String>,
        tool_use: Option<ToolUse>,
    },
    ToolResult {
        tool_use_id: String,
        result: ToolInvocationResult,
    },
}

impl Turn {
    pub fn role(&self) -> Role {
        match self {
            Turn::User { .. } => Role::User,
            Turn::Assistant { .. } => Role::Assistant,
            Turn::ToolResult { .. } => Role::ToolResult,
        }
    }
}

/// Ordered, append-only history of one agent run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation with a single user turn.
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::User {
                text: user_message.into(),
            }],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Append the assistant's tool request together with its result.
    ///
    /// Both turns are added in one step so the history never holds a tool
    /// request without its answer.
    pub(crate) fn append_exchange(
        &mut self,
        text: Option<String>,
        tool_use: ToolUse,
        result: ToolInvocationResult,
    ) {
        let tool_use_id = tool_use.id.clone();
        self.turns.reserve(2);
        self.turns.push(Turn::Assistant {
            text,
            tool_use: Some(tool_use),
        });
        self.turns.push(Turn::ToolResult {
            tool_use_id,
            result,
        });
    }
}

/// Why the model stopped producing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Final answer.
    EndTurn,
    /// The model wants a tool invoked.
    ToolUse,
    /// Output was cut off by the token limit.
    MaxTokens,
    Other(String),
}

/// A single model response.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReply {
    pub stop_reason: StopReason,
    pub text: Option<String>,
    pub tool_uses: Vec<ToolUse>,
}

impl ModelReply {
    /// A terminal text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            stop_reason: StopReason::EndTurn,
            text: Some(text.into()),
            tool_uses: Vec::new(),
        }
    }

    /// A reply requesting one tool call.
    pub fn tool_use(id: &str, name: &str, input: Value) -> Self {
        Self {
            stop_reason: StopReason::ToolUse,
            text: None,
            tool_uses: vec![ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input,
            }],
        }
    }
}

/// Turn-based channel to a language model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the full conversation and advertised tools, returning the next reply.
    async fn complete(&self, conversation: &Conversation, tools: &[ToolDefinition]) -> Result<ModelReply>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_append_exchange_adds_both_turns() {
        let mut conversation = Conversation::new("How many goals?");
        conversation.append_exchange(
            None,
            ToolUse {
                id: "call_1".to_string(),
                name: "get_player_stats".to_string(),
                input: json!({"player_name": "McDavid"}),
            },
            ToolInvocationResult::success("{}".to_string()),
        );

        let roles: Vec<_> = conversation.turns().iter().map(Turn::role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::ToolResult]);

        match &conversation.turns()[2] {
            Turn::ToolResult { tool_use_id, .. } => assert_eq!(tool_use_id, "call_1"),
            other => panic!("Expected tool result, got {:?}", other),
        }
    }

    #[test]
    fn test_turn_serialization_is_role_tagged() {
        let value = serde_json::to_value(Turn::User {
            text: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(value, json!({"role": "user", "text": "hi"}));
    }
}
