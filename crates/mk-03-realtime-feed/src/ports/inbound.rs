//! Inbound (Driving) port for the realtime feed.

use async_trait::async_trait;

use crate::domain::{Notification, NotificationTemplate, RealtimeState};

/// Operations consumers may invoke on the realtime store.
#[async_trait]
pub trait RealtimeFeedApi: Send + Sync {
    /// Vote counter tick: total grows, active voters are redrawn, turnout
    /// grows up to 100.
    async fn tick_votes(&self);

    /// Notification tick: with the configured probability, push one
    /// template drawn uniformly from the catalog.
    async fn tick_notifications(&self) -> Option<Notification>;

    /// Push an arbitrary notification.
    async fn send_notification(&self, template: NotificationTemplate) -> Notification;

    /// Mark a notification read. Unknown ids are ignored and return false.
    async fn mark_read(&self, id: &str) -> bool;

    /// Remove every notification and return how many were removed.
    async fn clear(&self) -> usize;

    /// `Connecting`, then `Connected` after the connect delay. Cannot fail.
    async fn connect(&self);

    /// Same transition as [`RealtimeFeedApi::connect`] from any state.
    async fn reconnect(&self);

    /// Copy of the current state.
    fn snapshot(&self) -> RealtimeState;
}
