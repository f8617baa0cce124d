//! Toast notifications
//!
//! Lifecycle of a toast: inserted hidden, shown after the enter delay,
//! hidden after its duration or on manual dismissal (whichever comes first),
//! removed from the view once the exit delay has elapsed. Each toast is
//! removed exactly once.

use crate::config::UiConfig;
use crate::view::format::capitalize;
use crate::view::View;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Identifier of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A notice as handed to the view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub severity: Severity,
    /// Capitalised severity name
    pub title: String,
    pub message: String,
}

/// Toast lifecycle changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    /// Attached to the view, not yet visible
    Inserted(Toast),
    /// Enter transition started
    Shown(ToastId),
    /// Exit transition started
    Hidden(ToastId),
    /// Detached from the view
    Removed(ToastId),
}

/// Toast timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTimings {
    pub enter_delay: Duration,
    pub exit_delay: Duration,
    pub default_duration: Duration,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for ToastTimings {
    fn from(config: &UiConfig) -> Self {
        Self {
            enter_delay: Duration::from_millis(config.toast_enter_delay_ms),
            exit_delay: Duration::from_millis(config.toast_exit_delay_ms),
            default_duration: Duration::from_millis(config.toast_duration_ms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Entering,
    Visible,
    Leaving,
}

struct Entry {
    phase: Phase,
    enter_task: Option<JoinHandle<()>>,
    auto_dismiss: Option<JoinHandle<()>>,
}

struct ToasterInner {
    view: Arc<dyn View>,
    timings: ToastTimings,
    entries: Mutex<HashMap<ToastId, Entry>>,
}

/// Owner of all live toasts
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<ToasterInner>,
}

impl Toaster {
    pub fn new(view: Arc<dyn View>, timings: ToastTimings) -> Self {
        Self {
            inner: Arc::new(ToasterInner {
                view,
                timings,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn timings(&self) -> ToastTimings {
        self.inner.timings
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ToastId, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Show a toast for the default duration
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.show_for(message, severity, self.inner.timings.default_duration)
    }

    /// Show a toast that dismisses itself after `duration`
    ///
    /// Must be called from within a tokio runtime.
    pub fn show_for(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            severity,
            title: capitalize(severity.as_str()),
            message: message.into(),
        };
        let id = toast.id;

        self.entries().insert(
            id,
            Entry {
                phase: Phase::Entering,
                enter_task: None,
                auto_dismiss: None,
            },
        );
        self.inner.view.toast(&ToastEvent::Inserted(toast));

        let enter_delay = self.inner.timings.enter_delay;
        let this = self.clone();
        let enter_task = tokio::spawn(async move {
            tokio::time::sleep(enter_delay).await;
            this.mark_visible(id);
        });

        let this = self.clone();
        let auto_dismiss = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            this.begin_removal(id, false);
        });

        match self.entries().get_mut(&id) {
            Some(entry) => {
                entry.enter_task = Some(enter_task);
                entry.auto_dismiss = Some(auto_dismiss);
            }
            None => {
                enter_task.abort();
                auto_dismiss.abort();
            }
        }

        debug!(toast = %id, severity = severity.as_str(), "toast shown");
        id
    }

    /// Dismiss a toast before its duration elapses.
    ///
    /// Returns `false` when the toast is already leaving or gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        self.begin_removal(id, true)
    }

    /// Number of toasts still attached to the view
    pub fn active_count(&self) -> usize {
        self.entries().len()
    }

    pub fn is_active(&self, id: ToastId) -> bool {
        self.entries().contains_key(&id)
    }

    fn mark_visible(&self, id: ToastId) {
        let shown = match self.entries().get_mut(&id) {
            Some(entry) if entry.phase == Phase::Entering => {
                entry.phase = Phase::Visible;
                entry.enter_task = None;
                true
            }
            _ => false,
        };
        if shown {
            self.inner.view.toast(&ToastEvent::Shown(id));
        }
    }

    fn begin_removal(&self, id: ToastId, manual: bool) -> bool {
        {
            let mut entries = self.entries();
            let entry = match entries.get_mut(&id) {
                Some(entry) if entry.phase != Phase::Leaving => entry,
                _ => return false,
            };

            entry.phase = Phase::Leaving;
            if let Some(task) = entry.enter_task.take() {
                task.abort();
            }
            // The auto-dismiss task calls in here itself and must not abort
            // itself; dropping its handle just detaches it.
            if let Some(task) = entry.auto_dismiss.take() {
                if manual {
                    task.abort();
                }
            }
        }

        self.inner.view.toast(&ToastEvent::Hidden(id));

        let exit_delay = self.inner.timings.exit_delay;
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(exit_delay).await;
            let removed = this.entries().remove(&id).is_some();
            if removed {
                this.inner.view.toast(&ToastEvent::Removed(id));
            }
        });

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Document, ViewEvent};

    fn toaster() -> (Arc<Document>, Toaster) {
        let document = Arc::new(Document::new());
        let toaster = Toaster::new(document.clone(), ToastTimings::default());
        (document, toaster)
    }

    fn removals(document: &Document, id: ToastId) -> usize {
        document.count_events(|event| *event == ViewEvent::Toast(ToastEvent::Removed(id)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_lifecycle_auto_dismiss() {
        let (document, toaster) = toaster();
        let id = toaster.show("Saved", Severity::Success);

        let toasts = document.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].title, "Success");
        assert!(!document.is_toast_visible(id));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(document.is_toast_visible(id));

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(!document.is_toast_visible(id));
        assert!(toaster.is_active(id));

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!toaster.is_active(id));
        assert!(document.toasts().is_empty());
        assert_eq!(removals(&document, id), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_removes_exactly_once() {
        let (document, toaster) = toaster();
        let id = toaster.show("Heads up", Severity::Info);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(toaster.dismiss(id));
        assert!(!toaster.dismiss(id));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(removals(&document, id), 1);

        // Well past the auto-dismiss deadline
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(removals(&document, id), 1);
        assert_eq!(
            document.count_events(|event| *event == ViewEvent::Toast(ToastEvent::Hidden(id))),
            1
        );
        assert_eq!(toaster.active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_before_visible_never_shows() {
        let (document, toaster) = toaster();
        let id = toaster.show("Quick", Severity::Warning);

        assert!(toaster.dismiss(id));
        tokio::time::sleep(Duration::from_millis(1_000)).await;

        assert_eq!(
            document.count_events(|event| *event == ViewEvent::Toast(ToastEvent::Shown(id))),
            0
        );
        assert_eq!(removals(&document, id), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration() {
        let (document, toaster) = toaster();
        let id = toaster.show_for("Copied", Severity::Success, Duration::from_millis(2_000));

        tokio::time::sleep(Duration::from_millis(2_350)).await;
        assert_eq!(removals(&document, id), 1);
    }

    #[test]
    fn test_dismiss_unknown_toast() {
        let (_document, toaster) = toaster();
        assert!(!toaster.dismiss(ToastId::new()));
    }
}
