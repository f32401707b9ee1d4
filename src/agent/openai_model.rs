//! OpenAI chat completions backend for the agent.

use super::model::{Conversation, ModelClient, ModelReply, StopReason, ToolUse, Turn};
use crate::config::AgentSettings;
use crate::error::{Result, StatlineError};
use crate::openai::create_client_with_timeout;
use crate::schema::ToolDefinition;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FinishReason,
    FunctionCall, FunctionObject,
};
use async_openai::Client;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// [`ModelClient`] backed by the OpenAI chat completions API.
pub struct OpenAiModel {
    client: Client<OpenAIConfig>,
    model: String,
    system_prompt: String,
    max_tokens: u32,
}

impl OpenAiModel {
    /// Build the client once from the `[agent]` settings.
    pub fn new(settings: &AgentSettings) -> Result<Self> {
        let client = create_client_with_timeout(
            Duration::from_secs(settings.request_timeout_secs),
            settings.api_base.as_deref(),
        )?;

        Ok(Self {
            client,
            model: settings.model.clone(),
            system_prompt: settings.system_prompt.clone(),
            max_tokens: settings.max_tokens,
        })
    }

    /// Override the model name.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    fn messages(&self, conversation: &Conversation) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);

        if !self.system_prompt.is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(self.system_prompt.clone())
                    .build()
                    .map_err(|e| StatlineError::Model(e.to_string()))?
                    .into(),
            );
        }

        for turn in conversation.turns() {
            messages.push(to_message(turn)?);
        }

        Ok(messages)
    }
}

#[async_trait]
impl ModelClient for OpenAiModel {
    #[instrument(skip_all, fields(model = %self.model, turns = conversation.len()))]
    #[allow(deprecated)]
    async fn complete(&self, conversation: &Conversation, tools: &[ToolDefinition]) -> Result<ModelReply> {
        let mut request = CreateChatCompletionRequestArgs::default();
        request
            .model(&self.model)
            .messages(self.messages(conversation)?)
            .max_tokens(self.max_tokens);
        if !tools.is_empty() {
            request.tools(tools.iter().map(to_openai_tool).collect::<Vec<_>>());
        }
        let request = request
            .build()
            .map_err(|e| StatlineError::Model(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| StatlineError::OpenAI(format!("Agent API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| StatlineError::Model("No response from model".to_string()))?;

        let tool_uses: Vec<ToolUse> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(from_openai_tool_call)
            .collect();

        let stop_reason = match choice.finish_reason {
            _ if !tool_uses.is_empty() => StopReason::ToolUse,
            Some(FinishReason::ToolCalls) => StopReason::ToolUse,
            Some(FinishReason::Length) => StopReason::MaxTokens,
            Some(FinishReason::Stop) | None => StopReason::EndTurn,
            Some(other) => StopReason::Other(format!("{:?}", other)),
        };

        debug!("Model stopped with {:?} ({} tool calls)", stop_reason, tool_uses.len());

        Ok(ModelReply {
            stop_reason,
            text: choice.message.content,
            tool_uses,
        })
    }
}

/// Convert a tool definition to the OpenAI function tool format.
pub fn to_openai_tool(tool: &ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: tool.name.clone(),
            description: Some(tool.description.clone()),
            parameters: Some(tool.input_schema()),
            strict: None,
        },
    }
}

fn from_openai_tool_call(call: ChatCompletionMessageToolCall) -> ToolUse {
    let raw = call.function.arguments;
    let input = if raw.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        // Unparseable arguments are passed through so the dispatcher can report them
        serde_json::from_str(&raw).unwrap_or(Value::String(raw))
    };

    ToolUse {
        id: call.id,
        name: call.function.name,
        input,
    }
}

fn to_message(turn: &Turn) -> Result<ChatCompletionRequestMessage> {
    let message = match turn {
        Turn::User { text } => ChatCompletionRequestUserMessageArgs::default()
            .content(text.clone())
            .build()
            .map_err(|e| StatlineError::Model(e.to_string()))?
            .into(),

        Turn::Assistant { text, tool_use } => {
            let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(text) = text {
                builder.content(text.clone());
            }
            if let Some(tool_use) = tool_use {
                let arguments = match &tool_use.input {
                    Value::String(raw) => raw.clone(),
                    other => other.to_string(),
                };
                builder.tool_calls(vec![ChatCompletionMessageToolCall {
                    id: tool_use.id.clone(),
                    r#type: ChatCompletionToolType::Function,
                    function: FunctionCall {
                        name: tool_use.name.clone(),
                        arguments,
                    },
                }]);
            }
            builder
                .build()
                .map_err(|e| StatlineError::Model(e.to_string()))?
                .into()
        }

        Turn::ToolResult {
            tool_use_id,
            result,
        } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(tool_use_id.clone())
            .content(result.content.clone())
            .build()
            .map_err(|e| StatlineError::Model(e.to_string()))?
            .into(),
    };

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tools::{curated_tools, ToolInvocationResult};
    use serde_json::json;

    #[test]
    fn test_to_openai_tool() {
        let tool = to_openai_tool(&curated_tools()[0]);
        assert_eq!(tool.function.name, "get_player_stats");
        let parameters = tool.function.parameters.unwrap();
        assert_eq!(parameters["required"], json!(["player_name"]));
    }

    #[test]
    fn test_from_openai_tool_call() {
        let call = ChatCompletionMessageToolCall {
            id: "call_abc".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "get_player_stats".to_string(),
                arguments: r#"{"player_name": "McDavid"}"#.to_string(),
            },
        };
        let tool_use = from_openai_tool_call(call);
        assert_eq!(tool_use.id, "call_abc");
        assert_eq!(tool_use.input, json!({"player_name": "McDavid"}));
    }

    #[test]
    fn test_empty_arguments_become_empty_object() {
        let call = ChatCompletionMessageToolCall {
            id: "call_1".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "x".to_string(),
                arguments: String::new(),
            },
        };
        assert_eq!(from_openai_tool_call(call).input, json!({}));
    }

    #[test]
    fn test_conversation_to_messages() {
        let settings = AgentSettings::default();
        let model = OpenAiModel::new(&settings).unwrap();

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

        let messages = model.messages(&conversation).unwrap();
        assert_eq!(messages.len(), 4);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::Tool(_)));
    }
}
