//! # jobdash CLI
//!
//! Command-line client for the JobApp AI job discovery backend.
//!
//! ## Usage
//!
//! - `jobdash` - Open the interactive dashboard
//! - `jobdash health` - Check backend health
//! - `jobdash jobs --source indeed` - List discovered jobs
//! - `jobdash start` - Start the discovery agent
//!
//! The dashboard mode keeps the agent status and statistics up to date in the
//! background while you move between pages.

use anyhow::Result;
use clap::{Parser, Subcommand};
use jobdash_core::JobFilters;
use std::path::PathBuf;

mod commands;
mod config;
mod output;

use commands::{
    dashboard_command, download_command, health_command, jobs_command, start_command,
    stats_command, status_command,
};
use config::CliConfigLoader;

/// jobdash - Dashboard for the JobApp AI job discovery agent
#[derive(Parser)]
#[command(name = "jobdash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard client for the JobApp AI job discovery backend")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file or directory path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend origin override, e.g. http://localhost:8000
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout override in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check backend health
    Health,

    /// Show the discovery agent status
    Status,

    /// Start the discovery agent
    Start,

    /// Show job and CV statistics
    Stats,

    /// List discovered jobs
    Jobs {
        /// Filter by company
        #[arg(long)]
        company: Option<String>,

        /// Filter by job title
        #[arg(long)]
        title: Option<String>,

        /// Filter by source (linkedin, kariyer, indeed)
        #[arg(long)]
        source: Option<String>,
    },

    /// Download a generated CV
    Download {
        /// CV identifier
        id: i64,

        /// Output file, defaults to optimized_cv_<id>.pdf
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Open the interactive dashboard (default)
    Dashboard,
}

/// Build a configuration loader from CLI arguments
fn build_config_loader(cli: &Cli) -> CliConfigLoader {
    let mut loader = CliConfigLoader::new();

    if let Some(config_path) = &cli.config {
        loader = loader.with_config_override(config_path.clone());
    }

    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url_override(base_url.clone());
    }

    if let Some(timeout_ms) = cli.timeout_ms {
        loader = loader.with_timeout_override(timeout_ms);
    }

    loader
}

fn job_filters(
    company: Option<String>,
    title: Option<String>,
    source: Option<String>,
) -> JobFilters {
    JobFilters {
        company,
        title,
        source,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with dashboard output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config_loader = build_config_loader(&cli);

    match cli.command {
        Some(Commands::Health) => health_command(config_loader).await,
        Some(Commands::Status) => status_command(config_loader).await,
        Some(Commands::Start) => start_command(config_loader).await,
        Some(Commands::Stats) => stats_command(config_loader).await,
        Some(Commands::Jobs {
            company,
            title,
            source,
        }) => jobs_command(config_loader, job_filters(company, title, source)).await,
        Some(Commands::Download { id, output }) => {
            download_command(config_loader, id, output).await
        }
        Some(Commands::Dashboard) | None => dashboard_command(config_loader).await,
    }
}
