//! View abstraction layer for the dashboard
//!
//! The controller never touches a document directly. It renders typed
//! [`Block`]s into named [`Region`]s through the [`View`] trait, so hosts can
//! paint them as HTML, as terminal text, or record them in tests.

pub mod components;
pub mod document;
pub mod format;
pub mod model;

pub use document::{Document, ViewEvent, EVENT_LOG_CAPACITY};
pub use model::{
    Action, ActionKind, AgentIndicator, Badge, BadgeKind, Block, ButtonState, DetailField,
    EmptyState, FilterForm, JobRow, JobsTable, PageSkeleton, ProgressBar, Region, StatCard,
    JOB_SOURCES,
};

use crate::notify::{ModalEvent, ToastEvent};

/// Abstract presentation surface
pub trait View: Send + Sync {
    /// Replace the content of `region`.
    ///
    /// Returns `false` and does nothing when the region is not currently
    /// present, e.g. a late response for a page the user already left.
    fn render(&self, region: Region, block: Block) -> bool;

    /// Whether `region` currently exists
    fn has_region(&self, region: Region) -> bool;

    /// Set the page header title and the document title
    fn set_titles(&self, page_title: &str, document_title: &str);

    /// Mark the navigation entry whose route matches exactly as active
    fn set_active_nav(&self, route: &str);

    /// Show or hide the loading overlay
    fn set_loading(&self, visible: bool);

    /// Apply a toast lifecycle change
    fn toast(&self, event: &ToastEvent);

    /// Apply a modal change
    fn modal(&self, event: &ModalEvent);
}
