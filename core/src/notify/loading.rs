//! Loading overlay

use crate::view::View;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Two-state loading indicator; repeated calls with the same flag are no-ops
pub struct LoadingIndicator {
    view: Arc<dyn View>,
    visible: AtomicBool,
}

impl LoadingIndicator {
    pub fn new(view: Arc<dyn View>) -> Self {
        Self {
            view,
            visible: AtomicBool::new(false),
        }
    }

    pub fn set(&self, show: bool) {
        if self.visible.swap(show, Ordering::SeqCst) != show {
            self.view.set_loading(show);
        }
    }

    pub fn show(&self) {
        self.set(true);
    }

    pub fn hide(&self) {
        self.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Document, ViewEvent};

    #[test]
    fn test_show_is_idempotent() {
        let document = Arc::new(Document::new());
        let loading = LoadingIndicator::new(document.clone());

        loading.show();
        loading.show();
        assert!(loading.is_visible());
        assert!(document.is_loading());
        assert_eq!(
            document.count_events(|event| *event == ViewEvent::Loading(true)),
            1
        );

        loading.hide();
        loading.hide();
        assert!(!document.is_loading());
        assert_eq!(
            document.count_events(|event| *event == ViewEvent::Loading(false)),
            1
        );
    }
}
