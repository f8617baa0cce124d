//! CLI command implementations

pub mod agent;
pub mod dashboard;
pub mod health;
pub mod jobs;
pub mod stats;

pub use agent::{start_command, status_command};
pub use dashboard::dashboard_command;
pub use health::health_command;
pub use jobs::{download_command, jobs_command};
pub use stats::stats_command;

use crate::config::CliConfigLoader;
use anyhow::{Context, Result};
use jobdash_core::ApiClient;
use tracing::debug;

/// Resolve configuration and build the backend client
pub async fn connect(config_loader: &CliConfigLoader) -> Result<ApiClient> {
    let config = config_loader.load().await?;
    debug!(base_url = %config.api_base(), "connecting to backend");
    ApiClient::new(&config).context("Failed to create API client")
}
