//! NHL data access: player lookup, stats retrieval and comparison.
//!
//! Two upstream services are involved. The search service turns a free-text
//! name into candidate players; the stats service returns a landing document
//! for a numeric player id. Both sit behind traits so the resolver and
//! fetcher can be exercised without the network.

mod client;
mod compare;
mod fetcher;
mod record;
mod resolver;

pub use client::NhlClient;
pub use compare::{compare, ComparisonReport, FieldComparison, TIED};
pub use fetcher::StatsFetcher;
pub use record::{PlayerRecord, StatValue, NUMERIC_FIELDS};
pub use resolver::{coerce_player_id, PlayerResolver};

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Player search backend.
#[async_trait]
pub trait PlayerSearch: Send + Sync {
    /// Return raw candidate matches for a free-text query, best match first.
    async fn search(&self, query: &str) -> Result<Vec<Value>>;
}

/// Player stats backend.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Return the raw landing document for a player id.
    async fn landing(&self, player_id: u64) -> Result<Value>;
}
