//! Job listing and CV download commands

use super::connect;
use crate::config::CliConfigLoader;
use crate::output::{formatters::format_jobs_table, print_lines};
use anyhow::{Context, Result};
use jobdash_core::view::JobsTable;
use jobdash_core::{CvDownload, DashboardApi, JobFilters};
use std::path::PathBuf;
use tracing::info;

/// List jobs matching the filters
pub async fn jobs_command(config_loader: CliConfigLoader, filters: JobFilters) -> Result<()> {
    let api = connect(&config_loader).await?;
    let list = api.jobs(&filters).await.context("Failed to load jobs")?;

    if list.jobs.is_empty() {
        println!("No job listings match your current filters.");
        return Ok(());
    }

    print_lines(&format_jobs_table(&JobsTable::from_jobs(&list.jobs)));
    println!("\n{} of {} jobs", list.jobs.len(), list.total);
    Ok(())
}

/// Download a generated CV to `output`, or `optimized_cv_<id>.pdf`
pub async fn download_command(
    config_loader: CliConfigLoader,
    cv_id: i64,
    output: Option<PathBuf>,
) -> Result<()> {
    let api = connect(&config_loader).await?;
    let bytes = api
        .download_cv(cv_id)
        .await
        .with_context(|| format!("Failed to download CV {}", cv_id))?;

    let path = output.unwrap_or_else(|| PathBuf::from(CvDownload::filename_for(cv_id)));
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("Failed to write CV to {}", path.display()))?;

    info!(cv_id, path = %path.display(), "CV saved");
    println!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
