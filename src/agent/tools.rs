//! Tool registry and dispatch for the agent system.

use crate::config::Toolset;
use crate::error::{Result, StatlineError};
use crate::nhl::{coerce_player_id, compare, PlayerResolver, StatsFetcher};
use crate::schema::{nhl_tools, ToolDefinition};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

/// Names of every tool the dispatcher can execute.
pub const TOOL_NAMES: [&str; 4] = [
    "get_player_stats",
    "compare_players",
    "searchPlayer",
    "getPlayerStats",
];

/// A decoded tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum ToolCall {
    /// Resolve a player by name and return current-season stats.
    #[serde(rename = "get_player_stats")]
    GetPlayerStats { player_name: String },

    /// Fetch two players and compare them field by field.
    #[serde(rename = "compare_players")]
    ComparePlayers {
        player1_name: String,
        player2_name: String,
    },

    /// Raw player search (generated from the OpenAPI document).
    #[serde(rename = "searchPlayer")]
    SearchPlayer { q: String },

    /// Stats by numeric id (generated from the OpenAPI document).
    #[serde(rename = "getPlayerStats")]
    GetPlayerStatsById {
        #[serde(rename = "playerId", deserialize_with = "deserialize_player_id")]
        player_id: u64,
    },
}

fn deserialize_player_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_player_id(&value)
        .ok_or_else(|| D::Error::custom(format!("playerId must be a positive integer, got {}", value)))
}

/// Decode a tool name and argument object into a [`ToolCall`].
pub fn parse_tool_call(name: &str, args: &Value) -> Result<ToolCall> {
    if !TOOL_NAMES.contains(&name) {
        return Err(StatlineError::UnknownTool(name.to_string()));
    }

    let mut object = match args {
        Value::Object(map) => map.clone(),
        Value::Null => serde_json::Map::new(),
        other => {
            return Err(StatlineError::InvalidArguments(format!(
                "expected an object, got {}",
                other
            )))
        }
    };
    object.insert("name".to_string(), Value::String(name.to_string()));

    serde_json::from_value(Value::Object(object))
        .map_err(|e| StatlineError::InvalidArguments(e.to_string()))
}

/// Outcome of a tool invocation as fed back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolInvocationResult {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// Routes tool calls to their handlers.
///
/// Dispatch never fails: unknown tools, bad arguments and handler errors all
/// come back as error-flagged results so the model can react to them.
pub struct ToolDispatcher {
    resolver: Arc<PlayerResolver>,
    fetcher: Arc<StatsFetcher>,
}

impl ToolDispatcher {
    pub fn new(resolver: Arc<PlayerResolver>, fetcher: Arc<StatsFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Run a tool by name.
    pub async fn dispatch(&self, name: &str, args: &Value) -> ToolInvocationResult {
        let call = match parse_tool_call(name, args) {
            Ok(call) => call,
            Err(StatlineError::UnknownTool(name)) => {
                warn!("Model requested unknown tool: {}", name);
                return ToolInvocationResult::error(format!("Unknown tool: {}", name));
            }
            Err(e) => return ToolInvocationResult::error(format!("Error: {}", e)),
        };

        match self.execute(&call).await {
            Ok(output) => match serde_json::to_string_pretty(&output) {
                Ok(content) => ToolInvocationResult::success(content),
                Err(e) => ToolInvocationResult::error(format!("Error: {}", e)),
            },
            Err(e) => {
                debug!("Tool {} failed: {}", name, e);
                ToolInvocationResult::error(format!("Error: {}", e))
            }
        }
    }

    /// Execute a decoded tool call.
    pub async fn execute(&self, call: &ToolCall) -> Result<Value> {
        match call {
            ToolCall::GetPlayerStats { player_name } => {
                let record = self.fetcher.fetch_by_name(&self.resolver, player_name).await?;
                Ok(serde_json::to_value(record)?)
            }
            ToolCall::ComparePlayers {
                player1_name,
                player2_name,
            } => {
                let player1 = self.fetcher.fetch_by_name(&self.resolver, player1_name).await?;
                let player2 = self.fetcher.fetch_by_name(&self.resolver, player2_name).await?;
                let comparison = compare(&player1, &player2);

                Ok(json!({
                    "player1": player1,
                    "player2": player2,
                    "comparison": comparison,
                }))
            }
            ToolCall::SearchPlayer { q } => Ok(Value::Array(self.resolver.search(q).await?)),
            ToolCall::GetPlayerStatsById { player_id } => {
                let record = self.fetcher.fetch(*player_id).await?;
                Ok(serde_json::to_value(record)?)
            }
        }
    }
}

/// Statically declared tools for name-based lookups.
pub fn curated_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            "get_player_stats",
            "Get current season statistics for an NHL player by name. Returns comprehensive \
            stats including goals, assists, points, shooting percentage, special teams \
            performance, and more.",
        )
        .with_parameter(
            "player_name",
            "string",
            "Full or partial player name (e.g., 'Connor McDavid', 'McDavid')",
            true,
        ),
        ToolDefinition::new(
            "compare_players",
            "Compare current season statistics between two NHL players. Shows who leads in \
            each statistical category and by how much.",
        )
        .with_parameter(
            "player1_name",
            "string",
            "First player's full or partial name (e.g., 'Connor McDavid')",
            true,
        )
        .with_parameter(
            "player2_name",
            "string",
            "Second player's full or partial name (e.g., 'Auston Matthews')",
            true,
        ),
    ]
}

/// Tool definitions to advertise for a toolset.
pub fn tool_definitions(toolset: Toolset) -> Result<Vec<ToolDefinition>> {
    match toolset {
        Toolset::Curated => Ok(curated_tools()),
        Toolset::Openapi => nhl_tools(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dispatcher, mcdavid_landing, ScriptedSearch, ScriptedStats};

    #[test]
    fn test_parse_get_player_stats() {
        let call = parse_tool_call("get_player_stats", &json!({"player_name": "McDavid"})).unwrap();
        assert_eq!(
            call,
            ToolCall::GetPlayerStats {
                player_name: "McDavid".to_string()
            }
        );
    }

    #[test]
    fn test_parse_player_id_as_string_or_number() {
        for args in [json!({"playerId": 8478402}), json!({"playerId": "8478402"})] {
            let call = parse_tool_call("getPlayerStats", &args).unwrap();
            assert_eq!(call, ToolCall::GetPlayerStatsById { player_id: 8478402 });
        }
    }

    #[test]
    fn test_parse_missing_argument() {
        let result = parse_tool_call("compare_players", &json!({"player1_name": "A"}));
        assert!(matches!(result, Err(StatlineError::InvalidArguments(_))));
    }

    #[test]
    fn test_parse_unknown_tool() {
        let result = parse_tool_call("get_weather", &json!({}));
        assert!(matches!(result, Err(StatlineError::UnknownTool(name)) if name == "get_weather"));
    }

    #[test]
    fn test_every_advertised_tool_is_registered() {
        let advertised = tool_definitions(Toolset::Curated)
            .unwrap()
            .into_iter()
            .chain(tool_definitions(Toolset::Openapi).unwrap());
        for tool in advertised {
            assert!(TOOL_NAMES.contains(&tool.name.as_str()), "{} not registered", tool.name);
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let dispatcher = dispatcher(ScriptedSearch::new(), ScriptedStats::new());

        let result = dispatcher.dispatch("drop_tables", &json!({})).await;

        assert!(result.is_error);
        assert_eq!(result.content, "Unknown tool: drop_tables");
    }

    #[tokio::test]
    async fn test_dispatch_get_player_stats() {
        let dispatcher = dispatcher(
            ScriptedSearch::new().with_results("McDavid", vec![json!({"playerId": "8478402"})]),
            ScriptedStats::new().with_landing(8478402, mcdavid_landing()),
        );

        let result = dispatcher
            .dispatch("get_player_stats", &json!({"player_name": "McDavid"}))
            .await;

        assert!(!result.is_error);
        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["player_name"], "Connor McDavid");
        assert_eq!(value["goals"], 26);
    }

    #[tokio::test]
    async fn test_dispatch_not_found_is_error_result() {
        let dispatcher = dispatcher(ScriptedSearch::new(), ScriptedStats::new());

        let result = dispatcher
            .dispatch("get_player_stats", &json!({"player_name": "Nobody"}))
            .await;

        assert!(result.is_error);
        assert_eq!(result.content, "Error: Player 'Nobody' not found");
    }

    #[tokio::test]
    async fn test_dispatch_bad_arguments_is_error_result() {
        let dispatcher = dispatcher(ScriptedSearch::new(), ScriptedStats::new());

        let result = dispatcher.dispatch("get_player_stats", &json!("McDavid")).await;

        assert!(result.is_error);
        assert!(result.content.starts_with("Error: Invalid tool arguments"));
    }

    #[tokio::test]
    async fn test_dispatch_compare_players() {
        let matthews = json!({
            "firstName": {"default": "Auston"},
            "lastName": {"default": "Matthews"},
            "featuredStats": {"regularSeason": {"subSeason": {"goals": 33, "assists": 30}}}
        });
        let dispatcher = dispatcher(
            ScriptedSearch::new()
                .with_results("McDavid", vec![json!({"playerId": 8478402})])
                .with_results("Matthews", vec![json!({"playerId": 8479318})]),
            ScriptedStats::new()
                .with_landing(8478402, mcdavid_landing())
                .with_landing(8479318, matthews),
        );

        let result = dispatcher
            .dispatch(
                "compare_players",
                &json!({"player1_name": "McDavid", "player2_name": "Matthews"}),
            )
            .await;

        assert!(!result.is_error, "{}", result.content);
        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value["player1"]["player_name"], "Connor McDavid");
        assert_eq!(value["player2"]["player_name"], "Auston Matthews");

        let goals = value["comparison"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["field"] == "goals")
            .unwrap();
        assert_eq!(goals["difference"], -7);
        assert_eq!(goals["leader"], "Auston Matthews");
    }

    #[tokio::test]
    async fn test_dispatch_search_player() {
        let dispatcher = dispatcher(
            ScriptedSearch::new().with_results("Crosby", vec![json!({"playerId": "8471675", "name": "Sidney Crosby"})]),
            ScriptedStats::new(),
        );

        let result = dispatcher.dispatch("searchPlayer", &json!({"q": "Crosby"})).await;

        assert!(!result.is_error);
        let value: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(value[0]["name"], "Sidney Crosby");
    }
}
