//! CLI command implementations.

mod agent;
mod compare;
mod config;
mod mcp;
mod stats;
mod tools;

pub use agent::run_agent;
pub use compare::run_compare;
pub use config::run_config;
pub use mcp::run_mcp;
pub use stats::run_stats;
pub use tools::run_tools;

use crate::agent::ToolDispatcher;
use crate::config::Settings;
use crate::nhl::{NhlClient, PlayerResolver, StatsFetcher};
use std::sync::Arc;

/// Resolver and fetcher sharing one HTTP client.
pub(crate) struct NhlServices {
    pub resolver: Arc<PlayerResolver>,
    pub fetcher: Arc<StatsFetcher>,
}

impl NhlServices {
    pub fn new(settings: &Settings) -> crate::Result<Self> {
        let client = Arc::new(NhlClient::new(&settings.nhl)?);
        Ok(Self {
            resolver: Arc::new(PlayerResolver::new(
                client.clone(),
                settings.cache.resolver_capacity,
            )),
            fetcher: Arc::new(StatsFetcher::new(client)),
        })
    }

    pub fn dispatcher(&self) -> ToolDispatcher {
        ToolDispatcher::new(self.resolver.clone(), self.fetcher.clone())
    }
}
