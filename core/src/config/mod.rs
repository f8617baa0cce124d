//! Minimal configuration module for jobdash core
//!
//! Only exports pure data types. All loading logic is in CLI layer.

pub mod types;

pub use types::{DashboardConfig, PollingConfig, UiConfig, DEFAULT_API_PREFIX, DEFAULT_BASE_URL};
