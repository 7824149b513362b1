//! Artificial delay port.
//!
//! Every simulated wait (QR generation, scanning, connection setup) goes
//! through [`Delay`] so tests can swap wall-clock sleeps for instant ones.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

/// Suspends the caller for a fixed duration.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock delay backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Resolves immediately after yielding once to the scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDelay;

#[async_trait]
impl Delay for InstantDelay {
    async fn sleep(&self, _duration: Duration) {
        tokio::task::yield_now().await;
    }
}

/// Resolves immediately and remembers every requested duration.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in call order.
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.lock().clone()
    }

    /// Sum of all requested durations.
    pub fn total(&self) -> Duration {
        self.calls.lock().iter().sum()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.calls.lock().push(duration);
        tokio::task::yield_now().await;
    }
}
