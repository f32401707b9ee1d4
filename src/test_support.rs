//! Scripted stand-ins for the network-facing traits.

use crate::agent::{Conversation, ModelClient, ModelReply, ToolDispatcher};
use crate::error::{Result, StatlineError};
use crate::nhl::{PlayerResolver, PlayerSearch, StatsFetcher, StatsSource};
use crate::schema::ToolDefinition;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Search backend answering from a fixed table. Unknown queries match nothing.
#[derive(Default)]
pub struct ScriptedSearch {
    results: HashMap<String, Vec<Value>>,
    failing: bool,
    cancel_on_call: Option<(usize, CancellationToken)>,
    calls: AtomicUsize,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, candidates: Vec<Value>) -> Self {
        self.results.insert(query.to_string(), candidates);
        self
    }

    /// Make every search fail as if the service were down.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Fire `token` while serving the `call`-th search (1-based).
    pub fn cancel_on_call(mut self, call: usize, token: CancellationToken) -> Self {
        self.cancel_on_call = Some((call, token));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerSearch for ScriptedSearch {
    async fn search(&self, query: &str) -> Result<Vec<Value>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((at, token)) = &self.cancel_on_call {
            if *at == call {
                token.cancel();
            }
        }
        if self.failing {
            return Err(StatlineError::NotFound("search service unavailable".to_string()));
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

/// Stats backend answering from a fixed table of landing documents.
#[derive(Default)]
pub struct ScriptedStats {
    landings: HashMap<u64, Value>,
    calls: AtomicUsize,
}

impl ScriptedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_landing(mut self, player_id: u64, landing: Value) -> Self {
        self.landings.insert(player_id, landing);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatsSource for ScriptedStats {
    async fn landing(&self, player_id: u64) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.landings
            .get(&player_id)
            .cloned()
            .ok_or_else(|| StatlineError::NotFound(format!("No stats found for player ID {}", player_id)))
    }
}

/// Model that replays a fixed list of replies and records what it was sent.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ModelReply>>,
    seen: Mutex<Vec<usize>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<ModelReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Conversation length observed on each call.
    pub fn conversation_lengths(&self) -> Vec<usize> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, conversation: &Conversation, _tools: &[ToolDefinition]) -> Result<ModelReply> {
        self.seen.lock().unwrap().push(conversation.len());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| StatlineError::Model("no scripted reply left".to_string()))
    }
}

/// Model whose calls never complete.
#[derive(Default)]
pub struct StalledModel {
    calls: AtomicUsize,
}

impl StalledModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelClient for StalledModel {
    async fn complete(&self, _conversation: &Conversation, _tools: &[ToolDefinition]) -> Result<ModelReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Dispatcher wired to scripted backends.
pub fn dispatcher(search: ScriptedSearch, stats: ScriptedStats) -> ToolDispatcher {
    let resolver = Arc::new(PlayerResolver::new(Arc::new(search), 16));
    let fetcher = Arc::new(StatsFetcher::new(Arc::new(stats)));
    ToolDispatcher::new(resolver, fetcher)
}

/// Landing document shaped like the stats service response for Connor McDavid.
pub fn mcdavid_landing() -> Value {
    json!({
        "playerId": 8478402,
        "firstName": {"default": "Connor"},
        "lastName": {"default": "McDavid"},
        "position": "C",
        "currentTeamAbbrev": "EDM",
        "featuredStats": {
            "regularSeason": {
                "subSeason": {
                    "gamesPlayed": 62,
                    "goals": 26,
                    "assists": 74,
                    "points": 100,
                    "shots": 170,
                    "shootingPctg": 0.152941,
                    "powerPlayGoals": 8,
                    "powerPlayPoints": 37,
                    "shorthandedGoals": 1,
                    "shorthandedPoints": 2,
                    "gameWinningGoals": 4,
                    "otGoals": 2,
                    "plusMinus": 21,
                    "pim": 37
                }
            }
        }
    })
}
