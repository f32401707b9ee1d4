//! Configuration module for Statline.
//!
//! Settings are read from a TOML file once at startup and passed down
//! explicitly to the components that need them.

mod settings;

pub use settings::{
    AgentSettings, CacheSettings, GeneralSettings, NhlSettings, Settings, Toolset,
    MAX_SEARCH_TIMEOUT_SECS, MAX_STATS_TIMEOUT_SECS,
};
