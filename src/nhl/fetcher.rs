//! Player stats retrieval and normalization.

use super::{PlayerRecord, PlayerResolver, StatsSource};
use crate::error::{Result, StatlineError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Fetches a player's landing document and normalizes it to a [`PlayerRecord`].
pub struct StatsFetcher {
    source: Arc<dyn StatsSource>,
}

impl StatsFetcher {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self { source }
    }

    /// Fetch the current-season record for a player id.
    ///
    /// One upstream round trip. Unknown ids and unreachable services surface
    /// as [`StatlineError::NotFound`]; unreadable documents as
    /// [`StatlineError::Schema`].
    #[instrument(skip(self))]
    pub async fn fetch(&self, player_id: u64) -> Result<PlayerRecord> {
        let landing = self.source.landing(player_id).await?;
        let record = PlayerRecord::from_landing(&landing)?;
        debug!("Fetched stats for {} ({})", record.player_name, player_id);
        Ok(record)
    }

    /// Resolve a name and fetch that player's record.
    pub async fn fetch_by_name(&self, resolver: &PlayerResolver, name: &str) -> Result<PlayerRecord> {
        let player_id = resolver
            .resolve(name)
            .await
            .ok_or_else(|| StatlineError::NotFound(format!("Player '{}' not found", name)))?;

        self.fetch(player_id).await
    }
}
