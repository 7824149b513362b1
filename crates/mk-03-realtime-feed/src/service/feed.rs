//! Realtime Feed Service
//!
//! Owns one [`RealtimeState`] behind a lock. The vote and notification
//! ticks run as two independent periodic tasks with no ordering between
//! them. Each mutation is a single read-modify-write under the write lock.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{DemoEvent, EventPublisher};
use shared_types::{short_id, ConnectionStatus, Delay, PeriodicTask, RandomSource, TimeSource};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{
    notification_catalog, FeedConfig, Notification, NotificationTemplate, RealtimeState, VoteTick,
};
use crate::ports::RealtimeFeedApi;

/// Realtime notification store.
pub struct RealtimeFeed {
    state: RwLock<RealtimeState>,
    time: Arc<dyn TimeSource>,
    rng: Arc<dyn RandomSource>,
    delay: Arc<dyn Delay>,
    publisher: Arc<dyn EventPublisher>,
    config: FeedConfig,
}

impl RealtimeFeed {
    pub fn new(
        time: Arc<dyn TimeSource>,
        rng: Arc<dyn RandomSource>,
        delay: Arc<dyn Delay>,
        publisher: Arc<dyn EventPublisher>,
        config: FeedConfig,
    ) -> Self {
        let state = RealtimeState::new(time.now());
        Self {
            state: RwLock::new(state),
            time,
            rng,
            delay,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.state.read().connection_status
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().notifications.clone()
    }

    pub fn unread_count(&self) -> usize {
        self.state.read().unread_count()
    }

    /// Run [`RealtimeFeedApi::tick_votes`] every `vote_tick_interval`.
    pub fn spawn_vote_ticker(self: &Arc<Self>) -> PeriodicTask {
        let feed = Arc::clone(self);
        PeriodicTask::spawn("vote-tick", self.config.vote_tick_interval, move || {
            let feed = Arc::clone(&feed);
            async move { feed.tick_votes().await }
        })
    }

    /// Run [`RealtimeFeedApi::tick_notifications`] every
    /// `notification_tick_interval`.
    pub fn spawn_notification_ticker(self: &Arc<Self>) -> PeriodicTask {
        let feed = Arc::clone(self);
        PeriodicTask::spawn(
            "notification-tick",
            self.config.notification_tick_interval,
            move || {
                let feed = Arc::clone(&feed);
                async move {
                    feed.tick_notifications().await;
                }
            },
        )
    }

    fn draw_vote_tick(&self) -> VoteTick {
        let active_voters = self.config.min_active_voters.saturating_add(
            self.rng.below(u64::from(self.config.active_voter_spread)) as u32,
        );
        VoteTick {
            new_votes: self.rng.below(self.config.max_new_votes_per_tick),
            active_voters,
            turnout_increase: self.rng.uniform(0.0, self.config.max_turnout_increase),
        }
    }

    async fn set_connection(&self, status: ConnectionStatus) {
        self.state.write().connection_status = status;
        debug!(status = status.as_str(), "Connection status changed");
        self.publisher
            .publish(DemoEvent::ConnectionStatusChanged { status })
            .await;
    }
}

#[async_trait]
impl RealtimeFeedApi for RealtimeFeed {
    async fn tick_votes(&self) {
        let tick = self.draw_vote_tick();
        let now = self.time.now();

        let (total_votes, active_voters, turnout_rate_percent) = {
            let mut state = self.state.write();
            state.apply_vote_tick(tick, now);
            (state.total_votes, state.active_voters, state.turnout_rate_percent)
        };
        debug!(total_votes, active_voters, turnout_rate_percent, "Vote stats updated");

        self.publisher
            .publish(DemoEvent::VoteStatsUpdated {
                total_votes,
                active_voters,
                turnout_rate_percent,
            })
            .await;
    }

    async fn tick_notifications(&self) -> Option<Notification> {
        if !self.rng.chance(self.config.notification_probability) {
            return None;
        }
        let catalog = notification_catalog();
        let index = self.rng.below(catalog.len() as u64) as usize;
        let template = catalog.into_iter().nth(index)?;
        Some(self.send_notification(template).await)
    }

    async fn send_notification(&self, template: NotificationTemplate) -> Notification {
        let notification =
            Notification::from_template(template, short_id(self.rng.as_ref()), self.time.now());
        self.state.write().push_notification(notification.clone());
        debug!(
            notification_id = %notification.id,
            category = notification.category.as_str(),
            "Notification pushed"
        );

        self.publisher
            .publish(DemoEvent::NotificationPushed {
                notification_id: notification.id.clone(),
                category: notification.category,
                priority: notification.priority,
                title: notification.title.clone(),
            })
            .await;
        notification
    }

    async fn mark_read(&self, id: &str) -> bool {
        if !self.state.write().mark_read(id) {
            debug!(notification_id = id, "Mark read ignored: unknown notification");
            return false;
        }
        self.publisher
            .publish(DemoEvent::NotificationRead {
                notification_id: id.to_string(),
            })
            .await;
        true
    }

    async fn clear(&self) -> usize {
        let removed = self.state.write().clear_notifications();
        self.publisher
            .publish(DemoEvent::NotificationsCleared { removed })
            .await;
        removed
    }

    async fn connect(&self) {
        self.set_connection(ConnectionStatus::Connecting).await;
        self.delay.sleep(self.config.connect_delay).await;
        self.set_connection(ConnectionStatus::Connected).await;
        info!("Realtime feed connected");
    }

    async fn reconnect(&self) {
        info!("Realtime feed reconnecting");
        self.connect().await;
    }

    fn snapshot(&self) -> RealtimeState {
        self.state.read().clone()
    }
}
