//! CLI module for Statline.

pub mod commands;
mod output;

pub use output::Output;

use crate::config::Toolset;
use clap::{Parser, Subcommand};

/// Statline - NHL player stats for tool-calling agents
///
/// Looks up current regular-season stats, compares players, and lets a
/// language model answer questions by calling those lookups as tools.
#[derive(Parser, Debug)]
#[command(name = "statline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "STATLINE_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the agent a question it can answer with the stats tools
    Agent {
        /// The task for the agent (e.g., "Who has more goals, McDavid or Draisaitl?")
        task: String,

        /// Extra context placed ahead of the task
        #[arg(long)]
        context: Option<String>,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum number of model calls before giving up
        #[arg(long)]
        max_iterations: Option<usize>,

        /// Tools to advertise (curated, openapi)
        #[arg(long)]
        toolset: Option<Toolset>,
    },

    /// Show current season stats for a player
    Stats {
        /// Player name as a free-text query
        name: String,
    },

    /// Compare two players field by field
    Compare {
        /// First player
        player_a: String,
        /// Second player
        player_b: String,
    },

    /// List tool definitions generated from an API description
    Tools {
        /// OpenAPI document (YAML or JSON); the bundled NHL document if omitted
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Start MCP server for AI assistant integration
    Mcp,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
