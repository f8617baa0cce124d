//! HTML rendering of page models

use super::format::escape_html;
use super::model::{
    Action, ActionKind, AgentIndicator, Badge, Block, ButtonState, DetailField, EmptyState,
    FilterForm, JobsTable, PageSkeleton, ProgressBar, Region, StatCard, JOB_SOURCES,
};
use crate::notify::{ModalContent, Toast};

/// Element id of each region in the HTML shell
pub fn region_id(region: Region) -> &'static str {
    match region {
        Region::Content => "contentBody",
        Region::SidebarStatus => "agentStatus",
        Region::StartAgentButton => "startAgentBtn",
        Region::StatsGrid => "statsGrid",
        Region::HealthProgress => "healthProgress",
        Region::LastUpdated => "lastUpdated",
        Region::JobFilters => "jobFilters",
        Region::JobsContainer => "jobsContainer",
        Region::CvsContainer => "cvsContainer",
        Region::AgentStatusValue => "agentStatusValue",
        Region::StartAgentControlButton => "startAgentControlBtn",
    }
}

/// Render any block
pub fn render_block(block: &Block) -> String {
    match block {
        Block::Page(page) => page_html(*page, |region| render_block(&page.initial_block(region))),
        Block::Text(text) => escape_html(text),
        Block::StatCards(cards) => cards.iter().map(stat_card).collect(),
        Block::Progress(bar) => progress_bar(bar),
        Block::JobsTable(table) => jobs_table(table),
        Block::EmptyState(state) => empty_state(state),
        Block::Filters(form) => filter_form(form),
        Block::Button(button) => button_html(button),
        Block::AgentIndicator(indicator) => agent_indicator(indicator),
        Block::Details(fields) => fields.iter().map(detail_field).collect(),
    }
}

pub fn stat_card(card: &StatCard) -> String {
    format!(
        r#"<div class="stat-card"><div class="stat-value">{}</div><div class="stat-label">{}</div></div>"#,
        escape_html(&card.value),
        escape_html(&card.label)
    )
}

pub fn progress_bar(bar: &ProgressBar) -> String {
    let background = if bar.healthy {
        "var(--gradient-primary)"
    } else {
        "var(--error-color)"
    };
    format!(
        r#"<div class="progress-container"><div class="progress-label">{}</div><div class="progress-bar"><div class="progress-fill" style="width: {}%; background: {}"></div></div></div>"#,
        escape_html(&bar.label),
        bar.percentage,
        background
    )
}

pub fn badge(badge: &Badge) -> String {
    format!(
        r#"<span class="badge badge-{}">{}</span>"#,
        badge.kind.as_str(),
        escape_html(&badge.text)
    )
}

/// Button or link for an action
pub fn action_html(action: &Action) -> String {
    let class = if action.primary {
        "btn btn-primary"
    } else {
        "btn btn-secondary"
    };
    match &action.kind {
        ActionKind::OpenLink(href) => format!(
            r#"<a href="{}" target="_blank" class="{}">{}</a>"#,
            escape_html(href),
            class,
            escape_html(&action.label)
        ),
        kind => format!(
            r#"<button class="{}" data-action="{}">{}</button>"#,
            class,
            escape_html(&action_name(kind)),
            escape_html(&action.label)
        ),
    }
}

fn action_name(kind: &ActionKind) -> String {
    match kind {
        ActionKind::StartAgent => "start-agent".to_string(),
        ActionKind::RefreshStats => "refresh-stats".to_string(),
        ActionKind::RefreshStatus => "refresh-status".to_string(),
        ActionKind::ApplyFilters => "apply-filters".to_string(),
        ActionKind::Navigate(route) => format!("navigate:{}", route),
        ActionKind::ViewJob(job_id) => format!("view-job:{}", job_id),
        ActionKind::OpenLink(href) => format!("open:{}", href),
        ActionKind::CloseModal => "close-modal".to_string(),
    }
}

pub fn jobs_table(table: &JobsTable) -> String {
    let header: String = JobsTable::HEADERS
        .iter()
        .map(|header| format!("<th>{}</th>", header))
        .collect();

    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            let view = Action::secondary(ActionKind::ViewJob(row.job_id), "View");
            let open = Action::primary(ActionKind::OpenLink(row.link.clone()), "Open");
            let cells = [
                format!("<strong>{}</strong>", escape_html(&row.title)),
                escape_html(&row.company),
                badge(&row.source),
                escape_html(&row.date),
                badge(&row.status),
                format!("{}{}", action_html(&view), action_html(&open)),
            ];
            let cells: String = cells
                .iter()
                .map(|cell| format!("<td>{}</td>", cell))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        r#"<div class="table-container"><table class="table table-hover"><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>"#,
        header, rows
    )
}

pub fn empty_state(state: &EmptyState) -> String {
    format!(
        r#"<div class="empty-state"><h3 class="empty-state-title">{}</h3><p class="empty-state-message">{}</p>{}</div>"#,
        escape_html(&state.title),
        escape_html(&state.message),
        state.action.as_ref().map(action_html).unwrap_or_default()
    )
}

pub fn filter_form(form: &FilterForm) -> String {
    let options: String = JOB_SOURCES
        .iter()
        .map(|(value, label)| {
            let selected = if form.source == *value { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, value, selected, label)
        })
        .collect();

    format!(
        concat!(
            r#"<div class="filters-grid">"#,
            r#"<input type="text" class="form-input" id="companyFilter" placeholder="Filter by company..." value="{}">"#,
            r#"<input type="text" class="form-input" id="titleFilter" placeholder="Filter by title..." value="{}">"#,
            r#"<select class="form-select" id="sourceFilter"><option value="">All Sources</option>{}</select>"#,
            "{}",
            "</div>"
        ),
        escape_html(&form.company),
        escape_html(&form.title),
        options,
        action_html(&Action::primary(ActionKind::ApplyFilters, "Apply Filters"))
    )
}

pub fn button_html(button: &ButtonState) -> String {
    format!(
        r#"<button class="btn btn-primary"{}>{}</button>"#,
        if button.disabled { " disabled" } else { "" },
        escape_html(&button.label)
    )
}

pub fn agent_indicator(indicator: &AgentIndicator) -> String {
    format!(
        r#"<span class="status-dot {}"></span><span class="status-text">{}</span>"#,
        escape_html(&indicator.status),
        escape_html(&indicator.label)
    )
}

pub fn detail_field(field: &DetailField) -> String {
    let value = if field.scrollable {
        format!(
            r#"<div class="detail-scroll">{}</div>"#,
            escape_html(&field.value)
        )
    } else {
        format!("<p>{}</p>", escape_html(&field.value))
    };
    format!(
        r#"<div class="form-group"><label class="form-label">{}</label>{}</div>"#,
        escape_html(&field.label),
        value
    )
}

/// Skeleton HTML of a page, with `region_html` supplying each region's body
pub fn page_html(page: PageSkeleton, region_html: impl Fn(Region) -> String) -> String {
    let slot = |region: Region| {
        format!(
            r#"<div id="{}">{}</div>"#,
            region_id(region),
            region_html(region)
        )
    };

    match page {
        PageSkeleton::Dashboard => format!(
            concat!(
                r#"<div class="stats-grid">{}</div>"#,
                r#"<div class="card"><div class="card-header"><h3 class="card-title">System Overview</h3>"#,
                r#"<p class="card-subtitle">Real-time status of your AI job discovery system</p></div>"#,
                r#"<div class="card-body">{}</div>"#,
                r#"<div class="card-footer">{}{}</div></div>"#,
                r#"<div class="card"><div class="card-header"><h3 class="card-title">Quick Actions</h3></div>"#,
                r#"<div class="card-body">{}</div></div>"#
            ),
            slot(Region::StatsGrid),
            slot(Region::HealthProgress),
            slot(Region::LastUpdated),
            action_html(&Action::secondary(ActionKind::RefreshStats, "Refresh")),
            [
                Action::primary(ActionKind::StartAgent, "Start Job Discovery"),
                Action::secondary(ActionKind::Navigate("jobs".to_string()), "View All Jobs"),
                Action::secondary(ActionKind::Navigate("cvs".to_string()), "View CVs"),
                Action::secondary(ActionKind::Navigate("agent".to_string()), "Agent Control"),
            ]
            .iter()
            .map(action_html)
            .collect::<String>()
        ),
        PageSkeleton::Jobs => format!(
            r#"<div class="filters-container">{}</div>{}"#,
            slot(Region::JobFilters),
            slot(Region::JobsContainer)
        ),
        PageSkeleton::Cvs => slot(Region::CvsContainer),
        PageSkeleton::Agent => format!(
            concat!(
                r#"<div class="card"><div class="card-header"><h3 class="card-title">Agent Status</h3>"#,
                r#"<p class="card-subtitle">Monitor and control your AI job discovery agent</p></div>"#,
                r#"<div class="card-body"><div class="stat-card">{}<div class="stat-label">Current Status</div></div></div>"#,
                r#"<div class="card-footer">{}{}</div></div>"#,
                r#"<div class="card"><div class="card-header"><h3 class="card-title">Agent Configuration</h3></div>"#,
                r#"<div class="card-body"><p>Agent configuration and advanced controls will be available in future updates.</p></div></div>"#
            ),
            slot(Region::AgentStatusValue),
            slot(Region::StartAgentControlButton),
            action_html(&Action::secondary(ActionKind::RefreshStatus, "Refresh Status"))
        ),
    }
}

pub fn toast_html(toast: &Toast, visible: bool) -> String {
    format!(
        concat!(
            r#"<div class="toast toast-{}{}" data-toast="{}">"#,
            r#"<div class="toast-header"><h4 class="toast-title">{}</h4><button class="toast-close">&times;</button></div>"#,
            r#"<p class="toast-message">{}</p></div>"#
        ),
        toast.severity.as_str(),
        if visible { " show" } else { "" },
        toast.id,
        escape_html(&toast.title),
        escape_html(&toast.message)
    )
}

pub fn modal_html(content: &ModalContent) -> String {
    format!(
        concat!(
            r#"<div class="modal-overlay active"><div class="modal">"#,
            r#"<div class="modal-header"><h3 id="modalTitle">{}</h3></div>"#,
            r#"<div class="modal-body">{}</div>"#,
            r#"<div class="modal-footer">{}</div></div></div>"#
        ),
        escape_html(&content.title),
        render_block(&content.body),
        content.footer.iter().map(action_html).collect::<String>()
    )
}
