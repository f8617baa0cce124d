//! Simple CLI configuration loader for jobdash
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./jobdash.json or ./.jobdash/config.json
//! 3. XDG config: $XDG_CONFIG_HOME/jobdash/config.json or ~/.config/jobdash/config.json
//! 4. Environment variables only (no files), on top of the defaults

use anyhow::{anyhow, Context, Result};
use jobdash_core::DashboardConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the backend origin
pub const ENV_BASE_URL: &str = "JOBDASH_BASE_URL";
/// Environment variable holding the request timeout in milliseconds
pub const ENV_TIMEOUT_MS: &str = "JOBDASH_TIMEOUT_MS";
/// Environment variable holding the agent status poll interval in milliseconds
pub const ENV_STATUS_INTERVAL_MS: &str = "JOBDASH_STATUS_INTERVAL_MS";
/// Environment variable holding the stats poll interval in milliseconds
pub const ENV_STATS_INTERVAL_MS: &str = "JOBDASH_STATS_INTERVAL_MS";

/// CLI configuration loader
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_url_override: Option<String>,
    timeout_override: Option<u64>,
    /// Directory searched for project config, defaults to the current directory
    working_dir: Option<PathBuf>,
    /// User config root, defaults to the platform config directory
    config_home: Option<PathBuf>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            config_override: None,
            base_url_override: None,
            timeout_override: None,
            working_dir: None,
            config_home: None,
        }
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set request timeout override
    pub fn with_timeout_override(mut self, timeout_ms: u64) -> Self {
        self.timeout_override = Some(timeout_ms);
        self
    }

    /// Search `dir` instead of the current directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Search `dir` instead of the platform config directory
    pub fn with_config_home(mut self, dir: PathBuf) -> Self {
        self.config_home = Some(dir);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<DashboardConfig> {
        self.load_with_env(|key| std::env::var(key).ok()).await
    }

    /// Load using `env` to look up environment variables
    pub async fn load_with_env<F>(&self, env: F) -> Result<DashboardConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            self.load_from_path(override_path).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    override_path.display()
                )
            })?
        } else {
            self.search_and_load(&env).await?
        };

        // Step 2: Apply flag overrides
        if let Some(base_url) = &self.base_url_override {
            config.base_url = base_url.clone();
        }
        if let Some(timeout_ms) = self.timeout_override {
            config.request_timeout_ms = timeout_ms;
        }

        // Step 3: Validate
        config
            .validate()
            .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

        Ok(config)
    }

    /// Search for config in priority order
    async fn search_and_load<F>(&self, env: &F) -> Result<DashboardConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Current working directory
        if let Some(config) = self.try_load_cwd().await? {
            return Ok(config);
        }

        // 2. XDG config directory
        if let Some(config) = self.try_load_xdg().await? {
            return Ok(config);
        }

        // 3. Environment variables only
        self.load_env_only(env)
    }

    /// Try loading from the working directory
    async fn try_load_cwd(&self) -> Result<Option<DashboardConfig>> {
        let cwd = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        // Try ./jobdash.json first
        let jobdash_json = cwd.join("jobdash.json");
        if jobdash_json.exists() {
            return Ok(Some(self.load_file(&jobdash_json).await?));
        }

        // Try ./.jobdash/config.json
        let jobdash_dir_config = cwd.join(".jobdash").join("config.json");
        if jobdash_dir_config.exists() {
            return Ok(Some(self.load_file(&jobdash_dir_config).await?));
        }

        Ok(None)
    }

    /// Try loading from XDG config directory
    async fn try_load_xdg(&self) -> Result<Option<DashboardConfig>> {
        let config_home = self.config_home.clone().or_else(dirs::config_dir);
        if let Some(config_dir) = config_home {
            let config_path = config_dir.join("jobdash").join("config.json");
            if config_path.exists() {
                return Ok(Some(self.load_file(&config_path).await?));
            }
        }
        Ok(None)
    }

    /// Build configuration from environment variables over the defaults
    fn load_env_only<F>(&self, env: &F) -> Result<DashboardConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DashboardConfig::default();

        if let Some(base_url) = env(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(timeout_ms) = parse_env_ms(env, ENV_TIMEOUT_MS)? {
            config.request_timeout_ms = timeout_ms;
        }
        if let Some(interval_ms) = parse_env_ms(env, ENV_STATUS_INTERVAL_MS)? {
            config.polling.status_interval_ms = interval_ms;
        }
        if let Some(interval_ms) = parse_env_ms(env, ENV_STATS_INTERVAL_MS)? {
            config.polling.stats_interval_ms = interval_ms;
        }

        debug!(base_url = %config.base_url, "no config file found, using environment");
        Ok(config)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<DashboardConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            // Try config.json in the directory
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<DashboardConfig> {
        debug!(path = %path.display(), "loading config file");
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl Default for CliConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_ms<F>(env: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    env(key)
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .with_context(|| {
                    format!("{} must be a number of milliseconds, got '{}'", key, value)
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    /// Loader isolated from the real working and config directories
    fn isolated(root: &TempDir) -> CliConfigLoader {
        CliConfigLoader::new()
            .with_working_dir(root.path().join("project"))
            .with_config_home(root.path().join("home"))
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_defaults_without_any_source() {
        let root = tempfile::tempdir().unwrap();
        let config = isolated(&root).load_with_env(no_env).await.unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[tokio::test]
    async fn test_cwd_config_wins_over_xdg() {
        let root = tempfile::tempdir().unwrap();
        write(
            &root.path().join("project").join("jobdash.json"),
            r#"{"base_url": "http://project:8000"}"#,
        );
        write(
            &root.path().join("home").join("jobdash").join("config.json"),
            r#"{"base_url": "http://home:8000"}"#,
        );

        let config = isolated(&root).load_with_env(no_env).await.unwrap();
        assert_eq!(config.base_url, "http://project:8000");
        // Unspecified fields keep their defaults
        assert_eq!(config.request_timeout_ms, 30_000);
    }

    #[tokio::test]
    async fn test_dot_dir_and_xdg_configs() {
        let root = tempfile::tempdir().unwrap();
        write(
            &root.path().join("home").join("jobdash").join("config.json"),
            r#"{"polling": {"status_interval_ms": 2000}}"#,
        );
        let config = isolated(&root).load_with_env(no_env).await.unwrap();
        assert_eq!(config.polling.status_interval_ms, 2_000);
        assert_eq!(config.polling.stats_interval_ms, 30_000);

        write(
            &root.path().join("project").join(".jobdash").join("config.json"),
            r#"{"ui": {"toast_duration_ms": 8000}}"#,
        );
        let config = isolated(&root).load_with_env(no_env).await.unwrap();
        assert_eq!(config.ui.toast_duration_ms, 8_000);
        assert_eq!(config.polling.status_interval_ms, 5_000);
    }

    #[tokio::test]
    async fn test_config_override_file_and_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("custom");
        write(&dir.join("config.json"), r#"{"request_timeout_ms": 1500}"#);

        let config = isolated(&root)
            .with_config_override(dir.clone())
            .load_with_env(no_env)
            .await
            .unwrap();
        assert_eq!(config.request_timeout_ms, 1_500);

        let config = isolated(&root)
            .with_config_override(dir.join("config.json"))
            .load_with_env(no_env)
            .await
            .unwrap();
        assert_eq!(config.request_timeout_ms, 1_500);
    }

    #[tokio::test]
    async fn test_missing_override_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let result = isolated(&root)
            .with_config_override(root.path().join("missing.json"))
            .load_with_env(no_env)
            .await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Config path does not exist"));
    }

    #[tokio::test]
    async fn test_malformed_file_reports_path() {
        let root = tempfile::tempdir().unwrap();
        write(&root.path().join("project").join("jobdash.json"), "{not json");

        let result = isolated(&root).load_with_env(no_env).await;
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn test_environment_only() {
        let root = tempfile::tempdir().unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_BASE_URL, "http://env:9000"),
            (ENV_TIMEOUT_MS, "2500"),
            (ENV_STATS_INTERVAL_MS, "60000"),
        ]);

        let config = isolated(&root)
            .load_with_env(|key| env.get(key).map(|v| v.to_string()))
            .await
            .unwrap();
        assert_eq!(config.base_url, "http://env:9000");
        assert_eq!(config.request_timeout_ms, 2_500);
        assert_eq!(config.polling.stats_interval_ms, 60_000);
        assert_eq!(config.polling.status_interval_ms, 5_000);
    }

    #[tokio::test]
    async fn test_invalid_environment_value() {
        let root = tempfile::tempdir().unwrap();
        let result = isolated(&root)
            .load_with_env(|key| (key == ENV_TIMEOUT_MS).then(|| "soon".to_string()))
            .await;
        assert!(format!("{:#}", result.unwrap_err()).contains(ENV_TIMEOUT_MS));
    }

    #[tokio::test]
    async fn test_flag_overrides_apply_last() {
        let root = tempfile::tempdir().unwrap();
        write(
            &root.path().join("project").join("jobdash.json"),
            r#"{"base_url": "http://project:8000", "request_timeout_ms": 1000}"#,
        );

        let config = isolated(&root)
            .with_base_url_override("http://flag:7000".to_string())
            .with_timeout_override(4_000)
            .load_with_env(no_env)
            .await
            .unwrap();
        assert_eq!(config.base_url, "http://flag:7000");
        assert_eq!(config.request_timeout_ms, 4_000);
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let root = tempfile::tempdir().unwrap();
        let result = isolated(&root)
            .with_timeout_override(0)
            .load_with_env(no_env)
            .await;
        assert!(format!("{:#}", result.unwrap_err()).contains("validation failed"));
    }
}
