//! Notification and overlay utilities
//!
//! Loading overlay, toasts and the modal dialog, plus [`Notifier::safe_api_call`]
//! which wraps an API call with the loading overlay and the uniform
//! error-to-toast policy.

pub mod loading;
pub mod modal;
pub mod toast;

pub use loading::LoadingIndicator;
pub use modal::{ClickTarget, Modal, ModalContent, ModalEvent};
pub use toast::{Severity, Toast, ToastEvent, ToastId, ToastTimings, Toaster};

use crate::error::{ApiError, Error};
use crate::view::View;
use std::future::Future;
use std::sync::Arc;
use tracing::error;

/// User-facing text for a failed call
pub fn user_message(err: &Error) -> &'static str {
    match err.api() {
        Some(ApiError::Timeout { .. }) => "Request timed out",
        Some(ApiError::Network { .. }) => "Unable to connect to server",
        Some(ApiError::Http { .. }) => "Server error occurred",
        _ => "An unexpected error occurred",
    }
}

/// Bundle of the overlay utilities sharing one view
pub struct Notifier {
    pub loading: LoadingIndicator,
    pub toasts: Toaster,
    pub modal: Modal,
}

impl Notifier {
    pub fn new(view: Arc<dyn View>, timings: ToastTimings) -> Self {
        Self {
            loading: LoadingIndicator::new(view.clone()),
            toasts: Toaster::new(view.clone(), timings),
            modal: Modal::new(view),
        }
    }

    /// Show a toast for the default duration
    pub fn toast(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.toasts.show(message, severity)
    }

    /// Log `err` and surface it as an error toast
    pub fn handle_error(&self, err: &Error, context: &str) {
        error!(context, error = %err, "operation failed");
        self.toasts.show(user_message(err), Severity::Error);
    }

    /// Run `call` under the loading overlay; failures become a toast and `None`
    pub async fn safe_api_call<T, F>(&self, context: &str, call: F) -> Option<T>
    where
        F: Future<Output = crate::error::Result<T>>,
    {
        self.loading.show();
        let result = call.await;
        self.loading.hide();

        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.handle_error(&err, context);
                None
            }
        }
    }
}
