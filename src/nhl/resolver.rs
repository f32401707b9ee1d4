//! Player name to id resolution with a bounded cache.

use super::PlayerSearch;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves free-text player names to NHL player ids.
///
/// Successful lookups are cached under the exact query string; misses are
/// never cached, so a later call with the same name queries again.
pub struct PlayerResolver {
    search: Arc<dyn PlayerSearch>,
    cache: Cache<String, u64>,
}

impl PlayerResolver {
    /// Create a resolver caching up to `capacity` names.
    pub fn new(search: Arc<dyn PlayerSearch>, capacity: usize) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity.max(1) as u64)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { search, cache }
    }

    /// Resolve a name to a player id, or `None` if it cannot be found.
    ///
    /// Lookup failures (network errors, timeouts, malformed candidates) are
    /// logged and reported as "not found".
    pub async fn resolve(&self, name: &str) -> Option<u64> {
        if let Some(id) = self.cache.get(name) {
            debug!("Resolved '{}' to {} from cache", name, id);
            return Some(id);
        }

        let candidates = match self.search.search(name).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("Error looking up player '{}': {}", name, e);
                return None;
            }
        };

        let id = candidates
            .first()
            .and_then(|candidate| candidate.get("playerId"))
            .and_then(coerce_player_id)?;

        debug!("Resolved '{}' to {}", name, id);
        self.cache.insert(name.to_string(), id);
        Some(id)
    }

    /// Whether a name is currently cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Raw search candidates, bypassing the cache.
    pub async fn search(&self, query: &str) -> crate::error::Result<Vec<Value>> {
        self.search.search(query).await
    }
}

/// Coerce an id that may arrive as a JSON number or a numeric string.
///
/// Zero and non-numeric values yield `None`.
pub fn coerce_player_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.filter(|&id| id != 0)
}
