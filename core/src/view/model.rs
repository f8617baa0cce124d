//! Page models rendered through the [`View`](super::View) port

use super::format::{format_date, format_match_score, format_number, non_empty};
use crate::api::{AgentStatus, HealthStatus, Job, Stats};
use serde::{Deserialize, Serialize};

/// Named slot of the page that can be rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Main content container every page skeleton is rendered into
    Content,
    /// Agent indicator in the sidebar
    SidebarStatus,
    /// Start button in the sidebar
    StartAgentButton,
    StatsGrid,
    HealthProgress,
    LastUpdated,
    /// Filter inputs on the jobs page
    JobFilters,
    JobsContainer,
    CvsContainer,
    AgentStatusValue,
    /// Start button on the agent page
    StartAgentControlButton,
}

impl Region {
    /// Regions that exist regardless of the page shown
    pub const SHELL: [Region; 3] = [
        Region::Content,
        Region::SidebarStatus,
        Region::StartAgentButton,
    ];

    pub fn is_shell(self) -> bool {
        Self::SHELL.contains(&self)
    }
}

/// Skeleton rendered into [`Region::Content`] when a page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSkeleton {
    Dashboard,
    Jobs,
    Cvs,
    Agent,
}

impl PageSkeleton {
    /// Regions the skeleton brings into existence
    pub fn regions(self) -> &'static [Region] {
        match self {
            PageSkeleton::Dashboard => &[
                Region::StatsGrid,
                Region::HealthProgress,
                Region::LastUpdated,
            ],
            PageSkeleton::Jobs => &[Region::JobFilters, Region::JobsContainer],
            PageSkeleton::Cvs => &[Region::CvsContainer],
            PageSkeleton::Agent => &[Region::AgentStatusValue, Region::StartAgentControlButton],
        }
    }

    /// Initial content of each region right after the skeleton renders
    pub fn initial_block(self, region: Region) -> Block {
        match (self, region) {
            (PageSkeleton::Dashboard, Region::StatsGrid) => {
                Block::StatCards(vec![StatCard::new("-", "Loading...")])
            }
            (PageSkeleton::Dashboard, Region::HealthProgress) => {
                Block::Progress(ProgressBar::new("System Health", 0, true))
            }
            (PageSkeleton::Dashboard, Region::LastUpdated) => {
                Block::Text("Last updated: Never".to_string())
            }
            (PageSkeleton::Jobs, Region::JobFilters) => Block::Filters(FilterForm::default()),
            (PageSkeleton::Jobs, Region::JobsContainer) => Block::EmptyState(EmptyState::new(
                "Loading Jobs",
                "Please wait while we fetch your job listings...",
            )),
            (PageSkeleton::Cvs, Region::CvsContainer) => Block::EmptyState(EmptyState::new(
                "Loading CVs",
                "Please wait while we fetch your optimized CVs...",
            )),
            (PageSkeleton::Agent, Region::AgentStatusValue) => Block::Text("-".to_string()),
            (PageSkeleton::Agent, Region::StartAgentControlButton) => {
                Block::Button(ButtonState::for_agent(false))
            }
            _ => Block::Text(String::new()),
        }
    }
}

/// What a button or link does when activated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    StartAgent,
    RefreshStats,
    RefreshStatus,
    ApplyFilters,
    Navigate(String),
    ViewJob(i64),
    OpenLink(String),
    CloseModal,
}

/// Labelled action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub label: String,
    pub primary: bool,
}

impl Action {
    pub fn primary(kind: ActionKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            primary: true,
        }
    }

    pub fn secondary(kind: ActionKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            primary: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub value: String,
    pub label: String,
}

impl StatCard {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The four dashboard cards
    pub fn from_stats(stats: &Stats) -> Vec<StatCard> {
        vec![
            StatCard::new(format_number(stats.total_jobs), "Total Jobs Found"),
            StatCard::new(format_number(stats.processed_jobs), "Jobs Processed"),
            StatCard::new(format_number(stats.total_cvs), "CVs Generated"),
            StatCard::new(format_match_score(stats.avg_match_score), "Avg Match Score"),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBar {
    pub label: String,
    pub percentage: u8,
    /// Healthy bars use the primary gradient, others the error colour
    pub healthy: bool,
}

impl ProgressBar {
    pub fn new(label: impl Into<String>, percentage: u8, healthy: bool) -> Self {
        Self {
            label: label.into(),
            percentage: percentage.min(100),
            healthy,
        }
    }

    /// Full when healthy, empty otherwise
    pub fn from_health(health: &HealthStatus) -> Self {
        let healthy = health.is_healthy();
        Self::new("System Health", if healthy { 100 } else { 0 }, healthy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeKind {
    Info,
    Success,
    Warning,
    Secondary,
}

impl BadgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeKind::Info => "info",
            BadgeKind::Success => "success",
            BadgeKind::Warning => "warning",
            BadgeKind::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub kind: BadgeKind,
}

impl Badge {
    pub fn new(text: impl Into<String>, kind: BadgeKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// One row of the jobs table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRow {
    pub job_id: i64,
    pub title: String,
    pub company: String,
    pub source: Badge,
    pub date: String,
    pub status: Badge,
    pub link: String,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        let status = if job.is_processed {
            Badge::new("Processed", BadgeKind::Success)
        } else {
            Badge::new("Pending", BadgeKind::Warning)
        };

        Self {
            job_id: job.job_id,
            title: job.title.clone(),
            company: non_empty(job.company.as_deref()).unwrap_or("N/A").to_string(),
            source: Badge::new(
                non_empty(job.source.as_deref()).unwrap_or("unknown"),
                BadgeKind::Info,
            ),
            date: format_date(job.scraped_date.as_deref()),
            status,
            link: job.link.clone(),
        }
    }
}

/// Jobs listing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobsTable {
    pub rows: Vec<JobRow>,
}

impl JobsTable {
    pub const HEADERS: [&'static str; 6] =
        ["Title", "Company", "Source", "Date", "Status", "Actions"];

    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self {
            rows: jobs.iter().map(JobRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
    pub action: Option<Action>,
}

impl EmptyState {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Source options of the jobs filter dropdown
pub const JOB_SOURCES: [(&str, &str); 3] = [
    ("linkedin", "LinkedIn"),
    ("kariyer", "Kariyer.net"),
    ("indeed", "Indeed"),
];

/// Current values of the jobs filter form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterForm {
    pub company: String,
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
}

impl ButtonState {
    /// Start button state for the given agent activity
    pub fn for_agent(running: bool) -> Self {
        if running {
            Self {
                label: "Agent Running".to_string(),
                disabled: true,
            }
        } else {
            Self {
                label: "Start Agent".to_string(),
                disabled: false,
            }
        }
    }
}

/// Sidebar agent indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIndicator {
    /// Raw status, used as the dot's style class
    pub status: String,
    pub label: String,
}

impl From<&AgentStatus> for AgentIndicator {
    fn from(status: &AgentStatus) -> Self {
        Self {
            status: status.status.clone(),
            label: status.label().to_string(),
        }
    }
}

/// Labelled value shown in detail views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    /// Long values render in a scrollable box
    pub scrollable: bool,
}

impl DetailField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            scrollable: false,
        }
    }

    pub fn scrollable(mut self) -> Self {
        self.scrollable = true;
        self
    }
}

/// Renderable content of a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Page skeleton, only valid in [`Region::Content`]
    Page(PageSkeleton),
    Text(String),
    StatCards(Vec<StatCard>),
    Progress(ProgressBar),
    JobsTable(JobsTable),
    EmptyState(EmptyState),
    Filters(FilterForm),
    Button(ButtonState),
    AgentIndicator(AgentIndicator),
    Details(Vec<DetailField>),
}
