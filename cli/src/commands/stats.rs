//! Aggregate statistics command

use super::connect;
use crate::config::CliConfigLoader;
use crate::output::{formatters::format_block, print_lines};
use anyhow::{Context, Result};
use jobdash_core::view::{Block, ProgressBar, StatCard};
use jobdash_core::DashboardApi;

/// Show the dashboard counters and system health
pub async fn stats_command(config_loader: CliConfigLoader) -> Result<()> {
    let api = connect(&config_loader).await?;

    let (stats, health) = futures::join!(api.stats(), api.health_check());
    let stats = stats.context("Failed to load dashboard statistics")?;

    let stats = stats.data.unwrap_or_default();
    print_lines(&format_block(&Block::StatCards(StatCard::from_stats(&stats))));
    print_lines(&format_block(&Block::Progress(ProgressBar::from_health(
        &health,
    ))));
    Ok(())
}
