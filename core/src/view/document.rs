//! In-memory [`View`] implementation
//!
//! Keeps the current region contents, overlay state and a bounded log of the
//! most recent updates applied to it. Hosts paint from it; tests assert
//! against it.

use super::components::{modal_html, page_html, render_block, toast_html};
use super::model::{Block, PageSkeleton, Region};
use super::View;
use crate::notify::{ModalContent, ModalEvent, Toast, ToastEvent, ToastId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Everything applied to a [`Document`], in order
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Rendered(Region),
    /// Render into a region that was not present
    Missed(Region),
    Titles {
        page_title: String,
        document_title: String,
    },
    ActiveNav(String),
    Loading(bool),
    Toast(ToastEvent),
    Modal(ModalEvent),
}

/// Number of events a [`Document`] keeps by default
pub const EVENT_LOG_CAPACITY: usize = 512;

#[derive(Default)]
struct State {
    regions: HashMap<Region, Block>,
    page: Option<PageSkeleton>,
    page_title: String,
    document_title: String,
    active_nav: Option<String>,
    loading: bool,
    toasts: Vec<(Toast, bool)>,
    modal: Option<ModalContent>,
    events: VecDeque<ViewEvent>,
    event_capacity: usize,
}

impl State {
    /// Append to the log, dropping the oldest entry once full
    fn record(&mut self, event: ViewEvent) {
        if self.event_capacity == 0 {
            return;
        }
        if self.events.len() == self.event_capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Region store backing the presentation
pub struct Document {
    state: Mutex<State>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with only the shell regions present
    pub fn new() -> Self {
        Self::with_event_capacity(EVENT_LOG_CAPACITY)
    }

    /// Like [`Document::new`], keeping at most `capacity` events
    pub fn with_event_capacity(capacity: usize) -> Self {
        let mut state = State {
            event_capacity: capacity,
            ..State::default()
        };
        for region in Region::SHELL {
            state.regions.insert(region, Block::Text(String::new()));
        }
        Self {
            state: Mutex::new(state),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current content of `region`
    pub fn block(&self, region: Region) -> Option<Block> {
        self.state().regions.get(&region).cloned()
    }

    /// HTML of `region`, with page skeletons expanded to their live regions
    pub fn html(&self, region: Region) -> Option<String> {
        let state = self.state();
        let block = state.regions.get(&region)?;
        Some(match block {
            Block::Page(page) => page_html(*page, |inner| {
                state
                    .regions
                    .get(&inner)
                    .map(render_block)
                    .unwrap_or_default()
            }),
            other => render_block(other),
        })
    }

    /// Skeleton currently shown in the content region
    pub fn page(&self) -> Option<PageSkeleton> {
        self.state().page
    }

    /// Page header title and document title
    pub fn titles(&self) -> (String, String) {
        let state = self.state();
        (state.page_title.clone(), state.document_title.clone())
    }

    pub fn active_nav(&self) -> Option<String> {
        self.state().active_nav.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// Toasts still attached, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.state()
            .toasts
            .iter()
            .map(|(toast, _)| toast.clone())
            .collect()
    }

    pub fn is_toast_visible(&self, id: ToastId) -> bool {
        self.state()
            .toasts
            .iter()
            .any(|(toast, visible)| toast.id == id && *visible)
    }

    pub fn modal(&self) -> Option<ModalContent> {
        self.state().modal.clone()
    }

    /// Markup of the attached toasts, oldest first
    pub fn toasts_html(&self) -> String {
        self.state()
            .toasts
            .iter()
            .map(|(toast, visible)| toast_html(toast, *visible))
            .collect()
    }

    /// Markup of the open modal
    pub fn modal_html(&self) -> Option<String> {
        self.state().modal.as_ref().map(modal_html)
    }

    /// Retained events, oldest first
    pub fn events(&self) -> Vec<ViewEvent> {
        self.state().events.iter().cloned().collect()
    }

    pub fn count_events(&self, predicate: impl Fn(&ViewEvent) -> bool) -> usize {
        self.state().events.iter().filter(|event| predicate(event)).count()
    }
}

impl View for Document {
    fn render(&self, region: Region, block: Block) -> bool {
        let mut state = self.state();
        if !state.regions.contains_key(&region) {
            state.record(ViewEvent::Missed(region));
            return false;
        }

        if region == Region::Content {
            state.regions.retain(|region, _| region.is_shell());
            state.page = None;
            if let Block::Page(page) = &block {
                for inner in page.regions() {
                    state.regions.insert(*inner, page.initial_block(*inner));
                }
                state.page = Some(*page);
            }
        }

        state.regions.insert(region, block);
        state.record(ViewEvent::Rendered(region));
        true
    }

    fn has_region(&self, region: Region) -> bool {
        self.state().regions.contains_key(&region)
    }

    fn set_titles(&self, page_title: &str, document_title: &str) {
        let mut state = self.state();
        state.page_title = page_title.to_string();
        state.document_title = document_title.to_string();
        state.record(ViewEvent::Titles {
            page_title: page_title.to_string(),
            document_title: document_title.to_string(),
        });
    }

    fn set_active_nav(&self, route: &str) {
        let mut state = self.state();
        state.active_nav = Some(route.to_string());
        state.record(ViewEvent::ActiveNav(route.to_string()));
    }

    fn set_loading(&self, visible: bool) {
        let mut state = self.state();
        state.loading = visible;
        state.record(ViewEvent::Loading(visible));
    }

    fn toast(&self, event: &ToastEvent) {
        let mut state = self.state();
        match event {
            ToastEvent::Inserted(toast) => state.toasts.push((toast.clone(), false)),
            ToastEvent::Shown(id) | ToastEvent::Hidden(id) => {
                let visible = matches!(event, ToastEvent::Shown(_));
                for (toast, shown) in state.toasts.iter_mut() {
                    if toast.id == *id {
                        *shown = visible;
                    }
                }
            }
            ToastEvent::Removed(id) => state.toasts.retain(|(toast, _)| toast.id != *id),
        }
        state.record(ViewEvent::Toast(event.clone()));
    }

    fn modal(&self, event: &ModalEvent) {
        let mut state = self.state();
        state.modal = match event {
            ModalEvent::Shown(content) => Some(content.clone()),
            ModalEvent::Hidden => None,
        };
        state.record(ViewEvent::Modal(event.clone()));
    }
}
