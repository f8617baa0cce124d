//! Records exchanged with the job backend

use serde::{Deserialize, Deserializer, Serialize};

/// A scraped job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: i64,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub link: String,
    /// Free-form description text as scraped
    #[serde(default)]
    pub descript: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// ISO-8601 timestamp of the scrape
    #[serde(default)]
    pub scraped_date: Option<String>,
    #[serde(default)]
    pub is_processed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /jobs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub message: String,
}

impl JobList {
    /// Find a job by its identifier
    pub fn find(&self, job_id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.job_id == job_id)
    }
}

/// Aggregate counters shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    #[serde(deserialize_with = "null_as_default")]
    pub total_jobs: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub processed_jobs: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_cvs: u64,
    /// `null` when no CV has been scored yet
    #[serde(deserialize_with = "null_as_default")]
    pub avg_match_score: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of `GET /stats`; the counters nest under `data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<Stats>,
}

/// Agent execution state as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    /// "idle", "running", "completed", "healthy" or "error"
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub jobs_found: u64,
    #[serde(default)]
    pub cvs_created: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl AgentStatus {
    pub fn new(status: impl Into<String>, message: Option<String>) -> Self {
        Self {
            status: status.into(),
            message,
            jobs_found: 0,
            cvs_created: 0,
            error: None,
        }
    }

    /// Placeholder shown when the status endpoint cannot be reached
    pub fn connection_failed() -> Self {
        Self::new("error", Some("Connection failed".to_string()))
    }

    pub fn is_running(&self) -> bool {
        self.status == "running"
    }

    /// Text for the sidebar indicator: the message, else the status, else "Unknown"
    pub fn label(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ if !self.status.is_empty() => &self.status,
            _ => "Unknown",
        }
    }
}

/// Response of `POST /agent/start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartAgentResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub task_id: Option<String>,
}

/// Backend health; also the shape `health_check` synthesises on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_host: Option<String>,
}

impl HealthStatus {
    /// Build the error status reported when the health request fails
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(message.into()),
            database: None,
            ai_agent: None,
            database_host: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_list_deserializes_backend_payload() {
        let payload = r#"{
            "jobs": [{
                "job_id": 7,
                "title": "Rust Engineer",
                "company": "Acme",
                "link": "https://jobs.example/7",
                "descript": null,
                "source": "linkedin",
                "scraped_date": "2024-03-05T14:30:00",
                "is_processed": true,
                "created_at": null
            }],
            "total": 1,
            "message": "Retrieved 1 jobs"
        }"#;

        let list: JobList = serde_json::from_str(payload).unwrap();
        assert_eq!(list.total, 1);
        let job = list.find(7).unwrap();
        assert_eq!(job.company.as_deref(), Some("Acme"));
        assert!(job.is_processed);
        assert!(list.find(8).is_none());
    }

    #[test]
    fn test_stats_missing_counters_default_to_zero() {
        let envelope: StatsEnvelope =
            serde_json::from_str(r#"{"status": "success", "data": {"total_jobs": 1234}}"#)
                .unwrap();
        let stats = envelope.data.unwrap();
        assert_eq!(stats.total_jobs, 1234);
        assert_eq!(stats.total_cvs, 0);
        assert_eq!(stats.avg_match_score, 0.0);
    }

    #[test]
    fn test_stats_null_counters_default_to_zero() {
        let payload = r#"{
            "status": "success",
            "data": {
                "total_jobs": 3,
                "processed_jobs": null,
                "total_cvs": null,
                "avg_match_score": null
            }
        }"#;

        let envelope: StatsEnvelope = serde_json::from_str(payload).unwrap();
        let stats = envelope.data.unwrap();
        assert_eq!(stats.total_jobs, 3);
        assert_eq!(stats.processed_jobs, 0);
        assert_eq!(stats.total_cvs, 0);
        assert_eq!(stats.avg_match_score, 0.0);
    }

    #[test]
    fn test_agent_status_label() {
        let status = AgentStatus::new("running", None);
        assert_eq!(status.label(), "running");
        assert!(status.is_running());

        let status = AgentStatus::connection_failed();
        assert_eq!(status.label(), "Connection failed");
        assert!(!status.is_running());

        let status = AgentStatus::new("", None);
        assert_eq!(status.label(), "Unknown");
    }

    #[test]
    fn test_health_error_shape() {
        let health = HealthStatus::error("boom");
        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value, serde_json::json!({"status": "error", "error": "boom"}));
        assert!(!health.is_healthy());
    }
}
