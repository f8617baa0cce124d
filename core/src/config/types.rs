//! Configuration types for jobdash core
//!
//! Core only accepts fully resolved configuration.
//! All discovery, loading, and merging happens in CLI layer.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default backend origin
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default path prefix of every backend endpoint
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Recurring poll intervals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Agent status refresh interval
    pub status_interval_ms: u64,
    /// Dashboard statistics refresh interval
    pub stats_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            status_interval_ms: 5_000,
            stats_interval_ms: 30_000,
        }
    }
}

/// Timings of transient UI elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a toast stays up before dismissing itself
    pub toast_duration_ms: u64,
    /// Delay between inserting a toast and making it visible
    pub toast_enter_delay_ms: u64,
    /// Exit transition length before a toast leaves the view
    pub toast_exit_delay_ms: u64,
    /// Quiet period for the text filters on the jobs page
    pub filter_debounce_ms: u64,
    /// Delay before the CV page swaps its loading placeholder
    pub cv_placeholder_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 5_000,
            toast_enter_delay_ms: 100,
            toast_exit_delay_ms: 300,
            filter_debounce_ms: 500,
            cv_placeholder_delay_ms: 1_000,
        }
    }
}

/// A fully resolved dashboard configuration ready for use by core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`
    pub base_url: String,
    /// Path prefix joined to every endpoint
    pub api_prefix: String,
    /// Client-side request timeout
    pub request_timeout_ms: u64,
    pub polling: PollingConfig,
    pub ui: UiConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_ms: 30_000,
            polling: PollingConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Create a config pointing at the given backend origin
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Override both poll intervals
    pub fn with_polling(mut self, status: Duration, stats: Duration) -> Self {
        self.polling.status_interval_ms = status.as_millis() as u64;
        self.polling.stats_interval_ms = stats.as_millis() as u64;
        self
    }

    /// Base every endpoint is appended to
    pub fn api_base(&self) -> String {
        let origin = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else if prefix.starts_with('/') {
            format!("{}{}", origin, prefix)
        } else {
            format!("{}/{}", origin, prefix)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.polling.status_interval_ms)
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.polling.stats_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "base_url".to_string(),
            });
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                value: self.base_url.clone(),
            });
        }

        let durations = [
            ("request_timeout_ms", self.request_timeout_ms),
            ("polling.status_interval_ms", self.polling.status_interval_ms),
            ("polling.stats_interval_ms", self.polling.stats_interval_ms),
            ("ui.toast_duration_ms", self.ui.toast_duration_ms),
        ];
        for (field, value) in durations {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.status_interval(), Duration::from_secs(5));
        assert_eq!(config.stats_interval(), Duration::from_secs(30));
        assert_eq!(config.ui.toast_exit_delay_ms, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_base_joins_prefix() {
        let config = DashboardConfig::new("http://localhost:8000/");
        assert_eq!(config.api_base(), "http://localhost:8000/api");

        let mut config = DashboardConfig::new("http://localhost:8000");
        config.api_prefix = "v2/".to_string();
        assert_eq!(config.api_base(), "http://localhost:8000/v2");

        config.api_prefix = String::new();
        assert_eq!(config.api_base(), "http://localhost:8000");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{"base_url": "http://jobs.local", "polling": {"status_interval_ms": 1000}}"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://jobs.local");
        assert_eq!(config.polling.status_interval_ms, 1000);
        assert_eq!(config.polling.stats_interval_ms, 30_000);
        assert_eq!(config.api_prefix, "/api");
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = DashboardConfig::default()
            .with_polling(Duration::from_secs(5), Duration::from_millis(0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("polling.stats_interval_ms"));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let config = DashboardConfig::new("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
