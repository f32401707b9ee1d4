//! Stats command implementation.

use super::NhlServices;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Look up one player and print the season line.
pub async fn run_stats(name: &str, settings: Settings) -> Result<()> {
    let services = NhlServices::new(&settings)?;

    let spinner = Output::spinner(&format!("Looking up {}...", name));
    let result = services.fetcher.fetch_by_name(&services.resolver, name).await;
    spinner.finish_and_clear();

    match result {
        Ok(record) => {
            Output::player_record(&record);
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}
