//! Line-driven dashboard session
//!
//! Runs the [`Dashboard`] controller against a [`TerminalView`] and turns each
//! line typed on stdin into a navigation or an action.

use crate::config::CliConfigLoader;
use crate::output::TerminalView;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use jobdash_core::app::Page;
use jobdash_core::router::normalize_path;
use jobdash_core::view::{ActionKind, JOB_SOURCES};
use jobdash_core::{ApiClient, Dashboard};
use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// One parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Navigate(Page),
    Company(String),
    Title(String),
    Source(String),
    Apply,
    View(i64),
    Download(i64),
    Start,
    Refresh,
    Escape,
    Help,
    Quit,
}

fn parse_id(command: &str, arg: &str) -> Result<i64> {
    arg.parse()
        .map_err(|_| anyhow!("'{}' expects a numeric id, got '{}'", command, arg))
}

impl FromStr for Input {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let command = command.to_ascii_lowercase();
        let input = match normalize_path(&command) {
            "dashboard" => Input::Navigate(Page::Dashboard),
            "jobs" => Input::Navigate(Page::Jobs),
            "cvs" => Input::Navigate(Page::Cvs),
            "agent" => Input::Navigate(Page::Agent),
            "company" => Input::Company(arg.to_string()),
            "title" => Input::Title(arg.to_string()),
            "source" => {
                let known = arg.is_empty() || JOB_SOURCES.iter().any(|(value, _)| *value == arg);
                if !known {
                    let values: Vec<&str> = JOB_SOURCES.iter().map(|(value, _)| *value).collect();
                    return Err(anyhow!(
                        "unknown source '{}', expected one of: {}",
                        arg,
                        values.join(", ")
                    ));
                }
                Input::Source(arg.to_string())
            }
            "apply" => Input::Apply,
            "view" => Input::View(parse_id(&command, arg)?),
            "download" => Input::Download(parse_id(&command, arg)?),
            "start" => Input::Start,
            "refresh" => Input::Refresh,
            "esc" | "close" => Input::Escape,
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            "" => return Err(anyhow!("empty input")),
            other => return Err(anyhow!("unknown command '{}', type 'help'", other)),
        };
        Ok(input)
    }
}

fn print_help() {
    let lines = [
        ("dashboard | jobs | cvs | agent", "switch page, #/jobs also works"),
        ("company <text>", "filter jobs by company"),
        ("title <text>", "filter jobs by title"),
        ("source [linkedin|kariyer|indeed]", "filter jobs by source"),
        ("apply", "run the job query now"),
        ("view <id>", "show job details"),
        ("download <id>", "save a generated CV"),
        ("start", "start the discovery agent"),
        ("refresh", "reload the current page"),
        ("esc", "close the details view"),
        ("quit", "leave the dashboard"),
    ];
    for (command, description) in lines {
        println!("  {:<34} {}", command.bold(), description);
    }
}

/// Apply one input; returns `false` when the session should end
async fn handle_input(dashboard: &Dashboard, input: Input) -> Result<bool> {
    debug!(?input, "dashboard input");
    match input {
        Input::Navigate(page) => dashboard.navigate(page.route()).await?,
        Input::Company(value) => {
            if !dashboard.set_company_filter(value) {
                println!("{}", "Filters are only available on the jobs page".dimmed());
            }
        }
        Input::Title(value) => {
            if !dashboard.set_title_filter(value) {
                println!("{}", "Filters are only available on the jobs page".dimmed());
            }
        }
        Input::Source(value) => {
            if !dashboard.set_source_filter(value).await {
                println!("{}", "Filters are only available on the jobs page".dimmed());
            }
        }
        Input::Apply => {
            if !dashboard.apply_filters().await {
                println!("{}", "Filters are only available on the jobs page".dimmed());
            }
        }
        Input::View(job_id) => dashboard.handle_action(&ActionKind::ViewJob(job_id)).await?,
        Input::Download(cv_id) => {
            if let Some(download) = dashboard.download_cv(cv_id).await {
                tokio::fs::write(&download.filename, &download.bytes)
                    .await
                    .with_context(|| format!("Failed to write {}", download.filename))?;
                info!(cv_id, file = %download.filename, "CV saved");
                println!("Saved {} ({} bytes)", download.filename, download.bytes.len());
            }
        }
        Input::Start => dashboard.handle_action(&ActionKind::StartAgent).await?,
        Input::Refresh => dashboard.reload().await?,
        Input::Escape => dashboard.handle_key("Escape"),
        Input::Help => print_help(),
        Input::Quit => return Ok(false),
    }
    Ok(true)
}

/// Read stdin on a plain thread so a pending read never holds up runtime shutdown
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to read input");
                    break;
                }
            }
        }
    });
    rx
}

/// Run the dashboard until `quit`, end of input or Ctrl-C
pub async fn dashboard_command(config_loader: CliConfigLoader) -> Result<()> {
    let config = config_loader.load().await?;
    let api = Arc::new(ApiClient::new(&config).context("Failed to create API client")?);
    let view = Arc::new(TerminalView::new());

    let dashboard = Dashboard::new(api, view, config);
    dashboard.init().await?;
    println!("{}", "Type 'help' for commands.".dimmed());

    let mut lines = spawn_stdin_reader();
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Input>() {
                    Ok(input) => {
                        if !handle_input(&dashboard, input).await? {
                            break;
                        }
                    }
                    Err(err) => println!("{}", err.to_string().yellow()),
                }
            }
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    warn!(error = %err, "failed to listen for Ctrl-C");
                }
                break;
            }
        }
    }

    dashboard.destroy();
    info!("dashboard closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!("jobs".parse::<Input>().unwrap(), Input::Navigate(Page::Jobs));
        assert_eq!(" Agent ".parse::<Input>().unwrap(), Input::Navigate(Page::Agent));
        assert_eq!("#/cvs".parse::<Input>().unwrap(), Input::Navigate(Page::Cvs));
        assert_eq!("/dashboard".parse::<Input>().unwrap(), Input::Navigate(Page::Dashboard));
    }

    #[test]
    fn test_parse_filters_keep_spaces() {
        assert_eq!(
            "company Acme Corp".parse::<Input>().unwrap(),
            Input::Company("Acme Corp".to_string())
        );
        assert_eq!("title".parse::<Input>().unwrap(), Input::Title(String::new()));
    }

    #[test]
    fn test_parse_source_validated() {
        assert_eq!(
            "source indeed".parse::<Input>().unwrap(),
            Input::Source("indeed".to_string())
        );
        assert_eq!("source".parse::<Input>().unwrap(), Input::Source(String::new()));
        assert!("source monster".parse::<Input>().is_err());
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("view 42".parse::<Input>().unwrap(), Input::View(42));
        assert_eq!("download 7".parse::<Input>().unwrap(), Input::Download(7));
        assert!("view abc".parse::<Input>().is_err());
        assert!("download".parse::<Input>().is_err());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("close".parse::<Input>().unwrap(), Input::Escape);
        assert_eq!("q".parse::<Input>().unwrap(), Input::Quit);
        assert_eq!("exit".parse::<Input>().unwrap(), Input::Quit);
        assert!("frobnicate".parse::<Input>().is_err());
    }
}
