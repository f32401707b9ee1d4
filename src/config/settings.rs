//! Configuration settings for Statline.

use crate::agent::DEFAULT_MAX_ITERATIONS;
use crate::error::{Result, StatlineError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound for the player search timeout.
pub const MAX_SEARCH_TIMEOUT_SECS: u64 = 5;
/// Upper bound for the stats fetch timeout.
pub const MAX_STATS_TIMEOUT_SECS: u64 = 10;

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a hockey analyst with access to live NHL statistics.

Use the available tools to look up players before answering. If a lookup
fails, try a different spelling or the player's full name.

When comparing players, cite the categories where each one leads.
Keep answers concise and base them only on the stats you retrieved."#;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub nhl: NhlSettings,
    pub cache: CacheSettings,
    pub agent: AgentSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl GeneralSettings {
    /// Tracing filter for the crate. `-v` flags override the configured level.
    pub fn log_filter(&self, verbose: u8) -> String {
        let level = match verbose {
            0 => self.log_level.as_str(),
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("statline={}", level)
    }
}

/// NHL search and stats service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NhlSettings {
    /// Player search endpoint.
    pub search_url: String,
    /// Base URL of the stats API.
    pub stats_url: String,
    /// Culture passed to the search service.
    pub culture: String,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    pub search_timeout_secs: u64,
    pub stats_timeout_secs: u64,
}

impl Default for NhlSettings {
    fn default() -> Self {
        Self {
            search_url: "https://search.d3.nhle.com/api/v1/search/player".to_string(),
            stats_url: "https://api-web.nhle.com/v1".to_string(),
            culture: "en-us".to_string(),
            user_agent: format!("statline/{}", env!("CARGO_PKG_VERSION")),
            search_timeout_secs: MAX_SEARCH_TIMEOUT_SECS,
            stats_timeout_secs: MAX_STATS_TIMEOUT_SECS,
        }
    }
}

/// Resolver cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached name lookups.
    pub resolver_capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            resolver_capacity: 128,
        }
    }
}

/// Which tool definitions the agent advertises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Toolset {
    /// Hand-written name-based tools (get_player_stats, compare_players).
    #[default]
    Curated,
    /// Tools generated from the embedded OpenAPI document.
    Openapi,
}

impl std::str::FromStr for Toolset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "curated" => Ok(Toolset::Curated),
            "openapi" => Ok(Toolset::Openapi),
            _ => Err(format!("Unknown toolset: {}", s)),
        }
    }
}

impl std::fmt::Display for Toolset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Toolset::Curated => write!(f, "curated"),
            Toolset::Openapi => write!(f, "openapi"),
        }
    }
}

/// Agent and model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Chat model used by the agent.
    pub model: String,
    /// Alternative OpenAI-compatible API base URL.
    pub api_base: Option<String>,
    /// Maximum model calls per run.
    pub max_iterations: usize,
    /// Maximum tokens per model response.
    pub max_tokens: u32,
    /// Timeout for each model request.
    pub request_timeout_secs: u64,
    /// Tools advertised to the model.
    pub toolset: Toolset,
    pub system_prompt: String,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: 1024,
            request_timeout_secs: crate::openai::DEFAULT_TIMEOUT_SECS,
            toolset: Toolset::Curated,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let settings: Settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Check bounds that the rest of the crate relies on.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(StatlineError::Config(format!(
                "general.log_level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        let nhl = &self.nhl;
        if nhl.search_timeout_secs == 0 || nhl.search_timeout_secs > MAX_SEARCH_TIMEOUT_SECS {
            return Err(StatlineError::Config(format!(
                "nhl.search_timeout_secs must be between 1 and {}",
                MAX_SEARCH_TIMEOUT_SECS
            )));
        }
        if nhl.stats_timeout_secs == 0 || nhl.stats_timeout_secs > MAX_STATS_TIMEOUT_SECS {
            return Err(StatlineError::Config(format!(
                "nhl.stats_timeout_secs must be between 1 and {}",
                MAX_STATS_TIMEOUT_SECS
            )));
        }
        for (key, value) in [("nhl.search_url", &nhl.search_url), ("nhl.stats_url", &nhl.stats_url)] {
            url::Url::parse(value)
                .map_err(|e| StatlineError::Config(format!("{} is not a valid URL: {}", key, e)))?;
        }
        if self.cache.resolver_capacity == 0 {
            return Err(StatlineError::Config(
                "cache.resolver_capacity must be at least 1".to_string(),
            ));
        }
        if self.agent.max_iterations == 0 {
            return Err(StatlineError::Config(
                "agent.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.agent.request_timeout_secs == 0 {
            return Err(StatlineError::Config(
                "agent.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StatlineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("statline")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}
