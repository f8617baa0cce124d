//! Trailing-edge debouncer
//!
//! Only the wait is debounced. Once an action has started it runs to
//! completion even if a newer call replaces it.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

struct Pending {
    handle: JoinHandle<()>,
    /// Set by whichever side gets there first: the task when its delay
    /// elapses, or a replacing call or cancel
    claimed: Arc<AtomicBool>,
}

impl Pending {
    /// Abort the task if its action has not started. Returns whether it was waiting.
    fn revoke(self) -> bool {
        if self.claimed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.handle.abort();
        true
    }
}

/// Runs only the last action scheduled within a quiet period
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `action` after the delay, replacing anything still waiting
    pub fn call<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let claimed = Arc::new(AtomicBool::new(false));
        let flag = claimed.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if flag.swap(true, Ordering::SeqCst) {
                return;
            }
            action.await;
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(Pending { handle, claimed });
        if let Some(previous) = previous {
            previous.revoke();
        }
    }

    /// Drop the waiting action, if any. Returns whether one was waiting.
    pub fn cancel(&self) -> bool {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        pending.is_some_and(Pending::revoke)
    }

    /// Whether an action is still waiting for its delay
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|pending| !pending.claimed.load(Ordering::SeqCst))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
