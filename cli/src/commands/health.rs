//! Backend health command

use super::connect;
use crate::config::CliConfigLoader;
use crate::output::{formatters::format_health, print_lines};
use anyhow::{bail, Result};
use jobdash_core::DashboardApi;
use tracing::info;

/// Print backend health; fails when the backend is not healthy
pub async fn health_command(config_loader: CliConfigLoader) -> Result<()> {
    let api = connect(&config_loader).await?;
    info!(url = %api.url("/health"), "checking backend health");

    let health = api.health_check().await;
    print_lines(&format_health(&health));

    if !health.is_healthy() {
        bail!("Backend is not healthy");
    }
    Ok(())
}
