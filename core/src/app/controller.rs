//! Dashboard controller
//!
//! Owns the router, the notifier and the two pollers, and renders each page
//! through the [`View`] port. Page handlers never fail: backend errors are
//! logged and surfaced as toasts, and a response for a page the user already
//! left renders into a missing region and is dropped by the view.

use super::debounce::Debouncer;
use super::poller::Poller;
use crate::api::{AgentStatus, DashboardApi, HealthStatus, Job, JobFilters, Stats};
use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::notify::{ClickTarget, ModalContent, Notifier, Severity, ToastId, ToastTimings};
use crate::router::{Dispatch, Router, DEFAULT_ROUTE};
use crate::view::format::{format_date, format_time_now, non_empty};
use crate::view::{
    Action, ActionKind, AgentIndicator, Block, ButtonState, DetailField, EmptyState, FilterForm,
    JobsTable, PageSkeleton, ProgressBar, Region, StatCard, View,
};
use bytes::Bytes;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Pages of the dashboard, used as route handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Jobs,
    Cvs,
    Agent,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Jobs, Page::Cvs, Page::Agent];

    /// Route name the page is registered under
    pub fn route(self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Jobs => "jobs",
            Page::Cvs => "cvs",
            Page::Agent => "agent",
        }
    }
}

/// A generated CV ready to be persisted by the host
#[derive(Debug, Clone, PartialEq)]
pub struct CvDownload {
    pub cv_id: i64,
    /// Suggested file name, `optimized_cv_<id>.pdf`
    pub filename: String,
    pub bytes: Bytes,
}

impl CvDownload {
    pub fn filename_for(cv_id: i64) -> String {
        format!("optimized_cv_{}.pdf", cv_id)
    }
}

impl From<&FilterForm> for JobFilters {
    fn from(form: &FilterForm) -> Self {
        JobFilters::new()
            .with_company(form.company.clone())
            .with_title(form.title.clone())
            .with_source(form.source.clone())
    }
}

struct Inner {
    api: Arc<dyn DashboardApi>,
    view: Arc<dyn View>,
    config: DashboardConfig,
    notifier: Notifier,
    router: Mutex<Router<Page>>,
    filters: Mutex<FilterForm>,
    debouncer: Debouncer,
    pollers: Mutex<Vec<Poller>>,
}

/// Application controller
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, view: Arc<dyn View>, config: DashboardConfig) -> Self {
        let notifier = Notifier::new(view.clone(), ToastTimings::from(&config.ui));
        let debouncer = Debouncer::new(Duration::from_millis(config.ui.filter_debounce_ms));

        Self {
            inner: Arc::new(Inner {
                api,
                view,
                config,
                notifier,
                router: Mutex::new(Router::new()),
                filters: Mutex::new(FilterForm::default()),
                debouncer,
                pollers: Mutex::new(Vec::new()),
            }),
        }
    }

    fn from_weak(inner: &Weak<Inner>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    fn router(&self) -> MutexGuard<'_, Router<Page>> {
        self.inner
            .router
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn form(&self) -> MutexGuard<'_, FilterForm> {
        self.inner
            .filters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn pollers(&self) -> MutexGuard<'_, Vec<Poller>> {
        self.inner
            .pollers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.inner.view
    }

    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Route recorded by the last navigation
    pub fn current_route(&self) -> Option<String> {
        self.router().current_route().map(ToString::to_string)
    }

    /// Current location fragment
    pub fn fragment(&self) -> String {
        self.router().fragment().to_string()
    }

    /// Values currently in the jobs filter form
    pub fn filter_form(&self) -> FilterForm {
        self.form().clone()
    }

    pub fn is_polling(&self) -> bool {
        !self.pollers().is_empty()
    }

    /// Register the pages, start polling, refresh the agent status and load
    /// the page for the current location.
    pub async fn init(&self) -> Result<()> {
        {
            let mut router = self.router();
            for page in Page::ALL {
                router.add_route(page.route(), page);
            }
        }

        self.start_pollers();
        self.update_agent_status().await;

        let dispatch = self.router().start()?;
        self.dispatch(dispatch).await;

        info!(route = ?self.current_route(), "dashboard initialised");
        Ok(())
    }

    fn start_pollers(&self) {
        let mut pollers = self.pollers();
        if !pollers.is_empty() {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        pollers.push(Poller::start(
            "agent-status",
            self.inner.config.status_interval(),
            move || {
                let dashboard = Self::from_weak(&weak);
                async move {
                    if let Some(dashboard) = dashboard {
                        dashboard.update_agent_status().await;
                    }
                }
            },
        ));

        let weak = Arc::downgrade(&self.inner);
        pollers.push(Poller::start(
            "stats",
            self.inner.config.stats_interval(),
            move || {
                let dashboard = Self::from_weak(&weak);
                async move {
                    let Some(dashboard) = dashboard else { return };
                    if dashboard.current_route().as_deref() == Some(DEFAULT_ROUTE) {
                        dashboard.load_dashboard_stats().await;
                    }
                }
            },
        ));
    }

    /// Move to `path` (`#/jobs`, `/jobs` or `jobs`) and load its page
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let dispatch = self.router().navigate(path)?;
        if let Some(dispatch) = dispatch {
            self.dispatch(dispatch).await;
        }
        Ok(())
    }

    /// React to an externally changed location fragment
    pub async fn on_location_change(&self, fragment: &str) -> Result<()> {
        let dispatch = self.router().set_fragment(fragment)?;
        self.dispatch(dispatch).await;
        Ok(())
    }

    /// Load the page for the current location again
    pub async fn reload(&self) -> Result<()> {
        let dispatch = self.router().handle_location_change()?;
        self.dispatch(dispatch).await;
        Ok(())
    }

    async fn dispatch(&self, dispatch: Dispatch<Page>) {
        let route = &dispatch.route;
        let view = &self.inner.view;
        view.set_active_nav(route.id.as_str());
        view.set_titles(&route.title, &route.document_title());
        debug!(route = %route.id, redirected = dispatch.redirected, "loading page");

        match dispatch.handler {
            Page::Dashboard => self.load_dashboard().await,
            Page::Jobs => self.load_jobs().await,
            Page::Cvs => self.load_cvs().await,
            Page::Agent => self.load_agent_control().await,
        }
    }

    fn report(&self, err: &Error, context: &str, message: &str) {
        error!(context, error = %err, "{}", message);
        self.inner.notifier.toast(message, Severity::Error);
    }

    pub async fn load_dashboard(&self) {
        self.inner
            .view
            .render(Region::Content, Block::Page(PageSkeleton::Dashboard));
        self.load_dashboard_stats().await;
    }

    /// Refresh the stat cards, the health bar and the last-updated stamp
    pub async fn load_dashboard_stats(&self) {
        let envelope = match self.inner.api.stats().await {
            Ok(envelope) => envelope,
            Err(err) => {
                self.report(&err, "load_dashboard_stats", "Failed to load dashboard statistics");
                return;
            }
        };
        let health = self.inner.api.health_check().await;

        if let Some(stats) = &envelope.data {
            self.update_stats_display(stats);
        }
        self.update_health_display(&health);
        self.inner.view.render(
            Region::LastUpdated,
            Block::Text(format!("Last updated: {}", format_time_now())),
        );
    }

    pub fn update_stats_display(&self, stats: &Stats) -> bool {
        self.inner
            .view
            .render(Region::StatsGrid, Block::StatCards(StatCard::from_stats(stats)))
    }

    pub fn update_health_display(&self, health: &HealthStatus) -> bool {
        self.inner.view.render(
            Region::HealthProgress,
            Block::Progress(ProgressBar::from_health(health)),
        )
    }

    pub async fn load_jobs(&self) {
        *self.form() = FilterForm::default();
        self.inner
            .view
            .render(Region::Content, Block::Page(PageSkeleton::Jobs));
        self.load_jobs_list(&JobFilters::new()).await;
    }

    /// Fetch the listing and render it as a table or an empty state
    pub async fn load_jobs_list(&self, filters: &JobFilters) {
        let list = match self.inner.api.jobs(filters).await {
            Ok(list) => list,
            Err(err) => {
                self.report(&err, "load_jobs_list", "Failed to load jobs");
                return;
            }
        };

        let block = if list.jobs.is_empty() {
            Block::EmptyState(
                EmptyState::new("No Jobs Found", "No job listings match your current filters.")
                    .with_action(Action::primary(ActionKind::StartAgent, "Start Job Discovery")),
            )
        } else {
            Block::JobsTable(JobsTable::from_jobs(&list.jobs))
        };

        if !self.inner.view.render(Region::JobsContainer, block) {
            debug!(jobs = list.jobs.len(), "jobs page left before the listing arrived");
        }
    }

    fn jobs_page_shown(&self) -> bool {
        self.inner.view.has_region(Region::JobFilters)
    }

    fn update_form(&self, update: impl FnOnce(&mut FilterForm)) -> bool {
        if !self.jobs_page_shown() {
            return false;
        }
        let form = {
            let mut form = self.form();
            update(&mut form);
            form.clone()
        };
        self.inner.view.render(Region::JobFilters, Block::Filters(form));
        true
    }

    fn schedule_filter(&self) {
        let this = self.clone();
        self.inner.debouncer.call(async move {
            this.filter_jobs().await;
        });
    }

    /// Company input changed; re-queries after the quiet period
    pub fn set_company_filter(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        let accepted = self.update_form(|form| form.company = value);
        if accepted {
            self.schedule_filter();
        }
        accepted
    }

    /// Title input changed; re-queries after the quiet period
    pub fn set_title_filter(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        let accepted = self.update_form(|form| form.title = value);
        if accepted {
            self.schedule_filter();
        }
        accepted
    }

    /// Source dropdown changed; re-queries immediately
    pub async fn set_source_filter(&self, value: impl Into<String>) -> bool {
        let value = value.into();
        if !self.update_form(|form| form.source = value) {
            return false;
        }
        self.filter_jobs().await;
        true
    }

    /// Apply button; re-queries immediately
    pub async fn apply_filters(&self) -> bool {
        if !self.jobs_page_shown() {
            return false;
        }
        self.inner.debouncer.cancel();
        self.filter_jobs().await;
        true
    }

    /// Re-query with the values currently in the form
    pub async fn filter_jobs(&self) {
        let filters = JobFilters::from(&*self.form());
        self.load_jobs_list(&filters).await;
    }

    /// Open the details modal of a job. Returns whether it was shown.
    pub async fn view_job_details(&self, job_id: i64) -> bool {
        let list = match self.inner.api.jobs(&JobFilters::new()).await {
            Ok(list) => list,
            Err(err) => {
                self.report(&err, "view_job_details", "Failed to load job details");
                return false;
            }
        };

        match list.find(job_id) {
            Some(job) => {
                self.inner.notifier.modal.show(job_details(job));
                true
            }
            None => {
                debug!(job_id, "job not in listing");
                false
            }
        }
    }

    pub async fn load_cvs(&self) {
        let view = self.inner.view.clone();
        view.render(Region::Content, Block::Page(PageSkeleton::Cvs));

        let delay = Duration::from_millis(self.inner.config.ui.cv_placeholder_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !view.render(Region::CvsContainer, Block::EmptyState(cv_placeholder())) {
                debug!("CV page left before the placeholder was shown");
            }
        });
    }

    pub async fn load_agent_control(&self) {
        self.inner
            .view
            .render(Region::Content, Block::Page(PageSkeleton::Agent));
        self.update_agent_status().await;
    }

    /// Trigger the discovery agent. Returns whether the backend accepted it.
    pub async fn start_agent(&self) -> bool {
        let notifier = &self.inner.notifier;
        notifier.loading.show();
        let result = self.inner.api.start_agent().await;
        notifier.loading.hide();

        match result {
            Ok(response) => {
                info!(task_id = ?response.task_id, status = %response.status, "agent started");
                notifier.toast("Agent started successfully", Severity::Success);
                self.update_agent_status().await;
                true
            }
            Err(err) => {
                self.report(&err, "start_agent", "Failed to start agent");
                false
            }
        }
    }

    /// Fetch the agent state and reflect it everywhere it is shown
    pub async fn update_agent_status(&self) -> AgentStatus {
        let status = match self.inner.api.agent_status().await {
            Ok(status) => status,
            Err(err) => {
                warn!(error = %err, "failed to get agent status");
                AgentStatus::connection_failed()
            }
        };
        self.display_agent_status(&status);
        status
    }

    pub fn display_agent_status(&self, status: &AgentStatus) {
        let view = &self.inner.view;
        view.render(
            Region::SidebarStatus,
            Block::AgentIndicator(AgentIndicator::from(status)),
        );

        if view.has_region(Region::AgentStatusValue) {
            let value = if status.status.is_empty() {
                "UNKNOWN".to_string()
            } else {
                status.status.to_uppercase()
            };
            view.render(Region::AgentStatusValue, Block::Text(value));
        }

        let button = ButtonState::for_agent(status.is_running());
        view.render(Region::StartAgentButton, Block::Button(button.clone()));
        if view.has_region(Region::StartAgentControlButton) {
            view.render(Region::StartAgentControlButton, Block::Button(button));
        }
    }

    /// Fetch a generated CV; failures are toasted and yield `None`
    pub async fn download_cv(&self, cv_id: i64) -> Option<CvDownload> {
        let bytes = self
            .inner
            .notifier
            .safe_api_call("download_cv", self.inner.api.download_cv(cv_id))
            .await?;

        Some(CvDownload {
            cv_id,
            filename: CvDownload::filename_for(cv_id),
            bytes,
        })
    }

    /// Run the action behind a button or link
    pub async fn handle_action(&self, action: &ActionKind) -> Result<()> {
        match action {
            ActionKind::StartAgent => {
                self.start_agent().await;
            }
            ActionKind::RefreshStats => self.load_dashboard_stats().await,
            ActionKind::RefreshStatus => {
                self.update_agent_status().await;
            }
            ActionKind::ApplyFilters => {
                self.apply_filters().await;
            }
            ActionKind::Navigate(route) => self.navigate(route).await?,
            ActionKind::ViewJob(job_id) => {
                self.view_job_details(*job_id).await;
            }
            ActionKind::OpenLink(href) => debug!(href = %href, "external link left to the host"),
            ActionKind::CloseModal => self.inner.notifier.modal.hide(),
        }
        Ok(())
    }

    pub fn handle_key(&self, key: &str) {
        self.inner.notifier.modal.on_key(key);
    }

    pub fn on_modal_click(&self, target: ClickTarget) {
        self.inner.notifier.modal.on_click(target);
    }

    pub fn dismiss_toast(&self, id: ToastId) -> bool {
        self.inner.notifier.toasts.dismiss(id)
    }

    /// Stop both pollers and drop any pending filter query. Safe to call repeatedly.
    pub fn destroy(&self) {
        let pollers = std::mem::take(&mut *self.pollers());
        for poller in &pollers {
            poller.stop();
        }
        let cancelled = self.inner.debouncer.cancel();

        if !pollers.is_empty() || cancelled {
            info!("dashboard stopped");
        }
    }
}

fn job_details(job: &Job) -> ModalContent {
    let fields = vec![
        DetailField::new("Title", job.title.as_str()),
        DetailField::new("Company", non_empty(job.company.as_deref()).unwrap_or("N/A")),
        DetailField::new(
            "Description",
            non_empty(job.descript.as_deref()).unwrap_or("No description available"),
        )
        .scrollable(),
        DetailField::new("Source", non_empty(job.source.as_deref()).unwrap_or("Unknown")),
        DetailField::new("Posted Date", format_date(job.scraped_date.as_deref())),
    ];

    ModalContent::new("Job Details", Block::Details(fields)).with_footer(vec![
        Action::secondary(ActionKind::CloseModal, "Close"),
        Action::primary(ActionKind::OpenLink(job.link.clone()), "View Original"),
    ])
}

fn cv_placeholder() -> EmptyState {
    EmptyState::new(
        "CV Manager Coming Soon",
        "CV management features will be available once CVs are generated by the agent.",
    )
    .with_action(Action::primary(ActionKind::StartAgent, "Generate CVs"))
}
