//! Agent status and start commands

use super::connect;
use crate::config::CliConfigLoader;
use crate::output::{formatters::format_agent_status, print_lines};
use anyhow::{Context, Result};
use colored::Colorize;
use jobdash_core::DashboardApi;

/// Show the discovery agent state
pub async fn status_command(config_loader: CliConfigLoader) -> Result<()> {
    let api = connect(&config_loader).await?;
    let status = api
        .agent_status()
        .await
        .context("Failed to get agent status")?;

    print_lines(&format_agent_status(&status));
    Ok(())
}

/// Trigger the discovery agent
pub async fn start_command(config_loader: CliConfigLoader) -> Result<()> {
    let api = connect(&config_loader).await?;
    let response = api.start_agent().await.context("Failed to start agent")?;

    println!("{}", "Agent started successfully".green());
    if !response.message.is_empty() {
        println!("{}", response.message);
    }
    if let Some(task_id) = &response.task_id {
        println!("Task: {}", task_id);
    }
    Ok(())
}
