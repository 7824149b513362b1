//! # Periodic Task
//!
//! Owned handle around a tokio task that runs a callback on a fixed period.
//!
//! The first run happens one full period after spawning. The task stops
//! when [`PeriodicTask::stop`] is awaited or when the handle is dropped.

use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

/// Smallest period accepted; tokio intervals reject zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running periodic task.
pub struct PeriodicTask {
    name: &'static str,
    period: Duration,
    shutdown_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Spawn `tick` every `period` on the current tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => tick().await,
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!(task = name, "Periodic task stopped");
        });

        debug!(task = name, period_ms = period.as_millis() as u64, "Periodic task started");

        Self {
            name,
            period,
            shutdown_tx,
            handle: Some(handle),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// True until the task has been stopped or has exited.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal shutdown and wait for the task to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.shutdown_tx.send(true);
            handle.abort();
        }
    }
}

impl std::fmt::Debug for PeriodicTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeriodicTask")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}
