//! # jobdash Core
//!
//! Core library for jobdash - the presentation and controller layer of a
//! job-search automation dashboard.
//!
//! This library provides the HTTP client for the job backend, the fragment
//! router, toasts and overlays, typed page models rendered through the
//! [`View`](view::View) port, and the [`Dashboard`] controller with its
//! status and statistics pollers.

// Core modules
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod notify;
pub mod router;
pub mod view;

// Re-export commonly used types
pub use api::{ApiClient, DashboardApi, JobFilters};
pub use app::{CvDownload, Dashboard, Page};
pub use config::DashboardConfig;
pub use error::{ApiError, Error, Result};
pub use notify::{Notifier, Severity};
pub use view::{Document, View};

/// Current version of the jobdash-core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the library
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Initialize tracing with a specific debug mode
pub fn init_tracing_with_debug(debug: bool) {
    let filter = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
