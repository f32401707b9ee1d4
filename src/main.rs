//! Statline CLI entry point.

use anyhow::Result;
use clap::Parser;
use statline::cli::{commands, Cli, Commands};
use statline::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.as_deref().map(Settings::expand_path);
    let settings = Settings::load_from(config_path.as_ref())?;

    // Initialize logging; stdout stays free for command output and MCP frames
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| settings.general.log_filter(cli.verbose)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Agent {
            task,
            context,
            model,
            max_iterations,
            toolset,
        } => {
            commands::run_agent(
                task,
                context.clone(),
                model.clone(),
                *max_iterations,
                *toolset,
                settings,
            )
            .await?;
        }

        Commands::Stats { name } => {
            commands::run_stats(name, settings).await?;
        }

        Commands::Compare { player_a, player_b } => {
            commands::run_compare(player_a, player_b, settings).await?;
        }

        Commands::Tools { file } => {
            commands::run_tools(file.as_deref())?;
        }

        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, config_path, settings)?;
        }
    }

    Ok(())
}
