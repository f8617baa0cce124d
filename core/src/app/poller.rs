//! Recurring background refresh

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Runs a tick every `period`, skipping ticks while the previous one is still in flight
pub struct Poller {
    name: &'static str,
    period: Duration,
    handle: JoinHandle<()>,
    in_flight: Arc<AtomicBool>,
}

impl Poller {
    /// Spawn the poller; the first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F, Fut>(name: &'static str, period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let in_flight = Arc::new(AtomicBool::new(false));
        let flag = in_flight.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                if flag.swap(true, Ordering::SeqCst) {
                    debug!(poller = name, "previous tick still running, skipping");
                    continue;
                }

                let flag = flag.clone();
                let run = tick();
                tokio::spawn(async move {
                    run.await;
                    flag.store(false, Ordering::SeqCst);
                });
            }
        });

        debug!(poller = name, period_ms = period.as_millis() as u64, "poller started");
        Self {
            name,
            period,
            handle,
            in_flight,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a tick is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Stop scheduling ticks; a tick already running is left to finish
    pub fn stop(&self) {
        if !self.handle.is_finished() {
            debug!(poller = self.name, "poller stopped");
        }
        self.handle.abort();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let poller = Poller::start("test", Duration::from_millis(100), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(260)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        poller.stop();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 3);
        assert!(poller.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_ticks_do_not_stack() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let poller = Poller::start("slow", Duration::from_millis(100), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(250)).await;
            }
        });

        // Ticks at 100 (runs until 350), 200 and 300 skipped, 400 runs
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(poller.is_busy());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }
}
