//! Statline - NHL player stats for tool-calling agents
//!
//! Resolves player names to league identifiers, fetches current
//! regular-season stats, and exposes those lookups as tools a language
//! model can call.
//!
//! # Architecture
//!
//! - `nhl` - Player search, stats retrieval, normalization and comparison
//! - `schema` - Tool definitions, including generation from OpenAPI documents
//! - `agent` - Tool dispatch and the model conversation loop
//! - `mcp` - MCP server exposing the same tools over stdio
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use statline::config::Settings;
//! use statline::nhl::{NhlClient, PlayerResolver, StatsFetcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let client = Arc::new(NhlClient::new(&settings.nhl)?);
//!     let resolver = PlayerResolver::new(client.clone(), settings.cache.resolver_capacity);
//!     let fetcher = StatsFetcher::new(client);
//!
//!     let record = fetcher.fetch_by_name(&resolver, "Connor McDavid").await?;
//!     println!("{}: {} points", record.player_name, record.points);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod nhl;
pub mod openai;
pub mod schema;

#[cfg(test)]
mod test_support;

pub use error::{Result, StatlineError};
