//! Plain-text formatting of page models for the terminal

use colored::{ColoredString, Colorize};
use jobdash_core::api::{AgentStatus, HealthStatus};
use jobdash_core::notify::{ModalContent, Severity, Toast};
use jobdash_core::view::format::truncate_text;
use jobdash_core::view::{
    Action, ActionKind, Badge, BadgeKind, Block, DetailField, EmptyState, JobsTable, Region,
};

/// Widest a table cell may get before it is truncated
const MAX_CELL_WIDTH: usize = 40;

/// Heading shown above a region's content, `None` for regions printed inline
pub fn region_label(region: Region) -> Option<&'static str> {
    match region {
        Region::Content => None,
        Region::SidebarStatus => Some("Agent"),
        Region::StartAgentButton | Region::StartAgentControlButton => Some("Start button"),
        Region::StatsGrid => Some("Statistics"),
        Region::HealthProgress => Some("Health"),
        Region::LastUpdated => None,
        Region::JobFilters => Some("Filters"),
        Region::JobsContainer => Some("Jobs"),
        Region::CvsContainer => Some("CVs"),
        Region::AgentStatusValue => Some("Current status"),
    }
}

pub fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("[{}]", severity.as_str());
    match severity {
        Severity::Info => label.blue(),
        Severity::Success => label.green(),
        Severity::Warning => label.yellow(),
        Severity::Error => label.red(),
    }
}

pub fn format_toast(toast: &Toast) -> String {
    format!("{} {}", severity_label(toast.severity), toast.message)
}

fn badge(badge: &Badge) -> ColoredString {
    match badge.kind {
        BadgeKind::Success => badge.text.green(),
        BadgeKind::Warning => badge.text.yellow(),
        BadgeKind::Info => badge.text.cyan(),
        BadgeKind::Secondary => badge.text.dimmed(),
    }
}

fn action_hint(action: &Action) -> String {
    let command = match &action.kind {
        ActionKind::StartAgent => "start".to_string(),
        ActionKind::RefreshStats | ActionKind::RefreshStatus => "refresh".to_string(),
        ActionKind::ApplyFilters => "apply".to_string(),
        ActionKind::Navigate(route) => route.clone(),
        ActionKind::ViewJob(job_id) => format!("view {}", job_id),
        ActionKind::OpenLink(href) => return format!("{}: {}", action.label, href),
        ActionKind::CloseModal => "esc".to_string(),
    };
    format!("{} (type '{}')", action.label, command)
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Jobs table with aligned columns
pub fn format_jobs_table(table: &JobsTable) -> Vec<String> {
    let headers = ["ID", "Title", "Company", "Source", "Date", "Status"];
    let rows: Vec<[String; 6]> = table
        .rows
        .iter()
        .map(|row| {
            [
                row.job_id.to_string(),
                truncate_text(&row.title, MAX_CELL_WIDTH),
                truncate_text(&row.company, MAX_CELL_WIDTH),
                row.source.text.clone(),
                row.date.clone(),
                row.status.text.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(|header| header.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header: Vec<String> = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(header, *width))
        .collect();
    lines.push(header.join("  ").bold().to_string());

    for (row, source) in rows.iter().zip(table.rows.iter()) {
        let mut cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        // Status is the last column; colour it without disturbing alignment
        cells[5] = badge(&source.status).to_string();
        lines.push(cells.join("  "));
    }
    lines
}

fn format_empty_state(state: &EmptyState) -> Vec<String> {
    let mut lines = vec![state.title.bold().to_string(), state.message.clone()];
    if let Some(action) = &state.action {
        lines.push(action_hint(action));
    }
    lines
}

fn format_details(fields: &[DetailField]) -> Vec<String> {
    fields
        .iter()
        .flat_map(|field| {
            if field.scrollable {
                let mut lines = vec![format!("{}:", field.label.bold())];
                lines.extend(field.value.lines().map(|line| format!("  {}", line)));
                lines
            } else {
                vec![format!("{}: {}", field.label.bold(), field.value)]
            }
        })
        .collect()
}

/// Text lines for a block; page skeletons print nothing themselves
pub fn format_block(block: &Block) -> Vec<String> {
    match block {
        Block::Page(_) => Vec::new(),
        Block::Text(text) if text.is_empty() => Vec::new(),
        Block::Text(text) => vec![text.clone()],
        Block::StatCards(cards) => cards
            .iter()
            .map(|card| format!("{:>10}  {}", card.value.bold(), card.label))
            .collect(),
        Block::Progress(bar) => {
            let filled = usize::from(bar.percentage) / 5;
            let gauge = format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled));
            let gauge = if bar.healthy { gauge.green() } else { gauge.red() };
            vec![format!("{} [{}] {}%", bar.label, gauge, bar.percentage)]
        }
        Block::JobsTable(table) => format_jobs_table(table),
        Block::EmptyState(state) => format_empty_state(state),
        Block::Filters(form) => {
            let show = |value: &str| {
                if value.is_empty() {
                    "-".to_string()
                } else {
                    value.to_string()
                }
            };
            vec![format!(
                "company: {}  title: {}  source: {}",
                show(&form.company),
                show(&form.title),
                show(&form.source)
            )]
        }
        Block::Button(button) => {
            let label = if button.disabled {
                button.label.dimmed()
            } else {
                button.label.bold()
            };
            vec![label.to_string()]
        }
        Block::AgentIndicator(indicator) => {
            let dot = match indicator.status.as_str() {
                "running" | "healthy" | "completed" => "●".green(),
                "error" => "●".red(),
                _ => "●".yellow(),
            };
            vec![format!("{} {}", dot, indicator.label)]
        }
        Block::Details(fields) => format_details(fields),
    }
}

pub fn format_modal(content: &ModalContent) -> Vec<String> {
    let mut lines = vec![format!("┌ {}", content.title.bold())];
    lines.extend(format_block(&content.body).into_iter().map(|line| format!("│ {}", line)));
    for action in &content.footer {
        lines.push(format!("│ {}", action_hint(action)));
    }
    lines.push("└".to_string());
    lines
}

pub fn format_health(health: &HealthStatus) -> Vec<String> {
    let status = if health.is_healthy() {
        health.status.green()
    } else {
        health.status.red()
    };
    let mut lines = vec![format!("Status: {}", status)];
    let optional = [
        ("Error", &health.error),
        ("Database", &health.database),
        ("Database host", &health.database_host),
        ("AI agent", &health.ai_agent),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{}: {}", label, value));
        }
    }
    lines
}

pub fn format_agent_status(status: &AgentStatus) -> Vec<String> {
    let mut lines = format_block(&Block::AgentIndicator(status.into()));
    lines.push(format!("Jobs found: {}", status.jobs_found));
    lines.push(format!("CVs created: {}", status.cvs_created));
    if let Some(error) = &status.error {
        lines.push(format!("Error: {}", error.red()));
    }
    lines
}
