//! Backend API access
//!
//! [`ApiClient`] is the transport with the uniform timeout and error policy;
//! [`DashboardApi`] is the seam the controller depends on, so tests can swap
//! in an in-memory backend.

pub mod backend;
pub mod client;
pub mod filters;
pub mod types;

pub use backend::DashboardApi;
pub use client::{ApiClient, RequestOptions, ResponseBody, JSON_CONTENT_TYPE};
pub use filters::JobFilters;
pub use types::{
    AgentStatus, HealthStatus, Job, JobList, StartAgentResponse, Stats, StatsEnvelope,
};
