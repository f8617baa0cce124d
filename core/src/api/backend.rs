//! Domain operations of the job backend

use super::client::{ApiClient, RequestOptions};
use super::filters::JobFilters;
use super::types::{AgentStatus, HealthStatus, JobList, StartAgentResponse, StatsEnvelope};
use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use tracing::debug;

/// Backend operations the dashboard depends on
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Read backend health; failures come back as an error status, never as `Err`
    async fn health_check(&self) -> HealthStatus;

    /// Trigger the background discovery agent
    async fn start_agent(&self) -> Result<StartAgentResponse>;

    /// Read the current agent state
    async fn agent_status(&self) -> Result<AgentStatus>;

    /// List jobs, optionally filtered
    async fn jobs(&self, filters: &JobFilters) -> Result<JobList>;

    /// Download a generated CV document
    async fn download_cv(&self, cv_id: i64) -> Result<Bytes>;

    /// Read aggregate statistics
    async fn stats(&self) -> Result<StatsEnvelope>;
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn health_check(&self) -> HealthStatus {
        let result = match self.get("/health").await {
            Ok(body) => body.into_json::<HealthStatus>(),
            Err(err) => Err(err),
        };

        result.unwrap_or_else(|err| {
            debug!(error = %err, "health check failed");
            let message = err.api().map(ToString::to_string);
            HealthStatus::error(message.unwrap_or_else(|| err.to_string()))
        })
    }

    async fn start_agent(&self) -> Result<StartAgentResponse> {
        self.post("/agent/start", &serde_json::json!({}))
            .await?
            .into_json()
    }

    async fn agent_status(&self) -> Result<AgentStatus> {
        self.get("/agent/status").await?.into_json()
    }

    async fn jobs(&self, filters: &JobFilters) -> Result<JobList> {
        self.get(&filters.endpoint()).await?.into_json()
    }

    async fn download_cv(&self, cv_id: i64) -> Result<Bytes> {
        let endpoint = format!("/cvs/{}/download", cv_id);
        let options = RequestOptions::new(Method::GET).without_default_headers();
        Ok(self.request(&endpoint, options).await?.into_bytes())
    }

    async fn stats(&self) -> Result<StatsEnvelope> {
        self.get("/stats").await?.into_json()
    }
}
