//! Modal dialog management

use crate::view::{Action, Block, View};
use std::sync::{Arc, Mutex, PoisonError};

/// Content of the single modal dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ModalContent {
    pub title: String,
    pub body: Block,
    pub footer: Vec<Action>,
}

impl ModalContent {
    pub fn new(title: impl Into<String>, body: Block) -> Self {
        Self {
            title: title.into(),
            body,
            footer: Vec::new(),
        }
    }

    pub fn with_footer(mut self, footer: Vec<Action>) -> Self {
        self.footer = footer;
        self
    }
}

/// Modal changes
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Shown(ModalContent),
    Hidden,
}

/// Where a click inside the overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop around the dialog
    Backdrop,
    /// The dialog itself
    Dialog,
}

/// The single modal dialog
pub struct Modal {
    view: Arc<dyn View>,
    current: Mutex<Option<ModalContent>>,
}

impl Modal {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            view,
            current: Mutex::new(None),
        }
    }

    /// Replace the content and show the overlay
    pub fn show(&self, content: ModalContent) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(content.clone());
        self.view.modal(&ModalEvent::Shown(content));
    }

    /// Hide the overlay; no-op when already hidden
    pub fn hide(&self) {
        let was_visible = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        if was_visible {
            self.view.modal(&ModalEvent::Hidden);
        }
    }

    /// Backdrop clicks close the dialog, clicks on the dialog do not
    pub fn on_click(&self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.hide();
        }
    }

    /// Escape closes the dialog
    pub fn on_key(&self, key: &str) {
        if key == "Escape" {
            self.hide();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn content(&self) -> Option<ModalContent> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
