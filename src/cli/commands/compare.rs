//! Compare command implementation.

use super::NhlServices;
use crate::cli::Output;
use crate::config::Settings;
use crate::nhl::{compare, PlayerRecord};
use anyhow::Result;

/// Fetch two players and print the field-by-field comparison.
pub async fn run_compare(player_a: &str, player_b: &str, settings: Settings) -> Result<()> {
    let services = NhlServices::new(&settings)?;

    let spinner = Output::spinner(&format!("Comparing {} and {}...", player_a, player_b));
    let result = fetch_pair(&services, player_a, player_b).await;
    spinner.finish_and_clear();

    match result {
        Ok((a, b)) => {
            Output::comparison(&compare(&a, &b));
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}

async fn fetch_pair(
    services: &NhlServices,
    player_a: &str,
    player_b: &str,
) -> crate::Result<(PlayerRecord, PlayerRecord)> {
    let a = services.fetcher.fetch_by_name(&services.resolver, player_a).await?;
    let b = services.fetcher.fetch_by_name(&services.resolver, player_b).await?;
    Ok((a, b))
}
