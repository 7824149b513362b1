//! Realtime feed entities and their pure mutations.

use serde::{Deserialize, Serialize};
use shared_types::{ConnectionStatus, NotificationCategory, NotificationPriority, Timestamp};

/// Most recent notifications kept. Older ones are dropped on insert.
pub const MAX_NOTIFICATIONS: usize = 20;

/// Turnout never rises above this.
pub const TURNOUT_CEILING: f64 = 100.0;

pub const INITIAL_TOTAL_VOTES: u64 = 1247;
pub const INITIAL_ACTIVE_VOTERS: u32 = 23;
pub const INITIAL_TURNOUT_PERCENT: f64 = 68.3;

/// Content of a notification before it gets an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplate {
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
}

impl NotificationTemplate {
    pub fn new(
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: NotificationPriority,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
            priority,
        }
    }

    /// "New Vote Recorded".
    pub fn vote_recorded() -> Self {
        Self::new(
            NotificationCategory::Vote,
            "New Vote Recorded",
            "Vote successfully encrypted and stored",
            NotificationPriority::Low,
        )
    }

    /// "QR Verification Complete".
    pub fn verification_complete() -> Self {
        Self::new(
            NotificationCategory::Verification,
            "QR Verification Complete",
            "User identity verified successfully",
            NotificationPriority::Medium,
        )
    }

    /// "System Status Update".
    pub fn system_status() -> Self {
        Self::new(
            NotificationCategory::System,
            "System Status Update",
            "All systems operating normally",
            NotificationPriority::Low,
        )
    }
}

/// The fixed catalog the periodic notification tick draws from.
pub fn notification_catalog() -> [NotificationTemplate; 3] {
    [
        NotificationTemplate::vote_recorded(),
        NotificationTemplate::verification_complete(),
        NotificationTemplate::system_status(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub created_at: Timestamp,
    pub read: bool,
    pub priority: NotificationPriority,
}

impl Notification {
    pub fn from_template(template: NotificationTemplate, id: String, created_at: Timestamp) -> Self {
        Self {
            id,
            category: template.category,
            title: template.title,
            message: template.message,
            created_at,
            read: false,
            priority: template.priority,
        }
    }
}

/// Random deltas for one vote tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoteTick {
    /// Added to the running total.
    pub new_votes: u64,
    /// Replaces the active voter count.
    pub active_voters: u32,
    /// Added to turnout before clamping.
    pub turnout_increase: f64,
}

/// Process-local realtime state owned by one feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeState {
    pub total_votes: u64,
    pub active_voters: u32,
    pub turnout_rate_percent: f64,
    pub connection_status: ConnectionStatus,
    pub last_update: Timestamp,
    pub notifications: Vec<Notification>,
}

impl RealtimeState {
    pub fn new(now: Timestamp) -> Self {
        Self {
            total_votes: INITIAL_TOTAL_VOTES,
            active_voters: INITIAL_ACTIVE_VOTERS,
            turnout_rate_percent: INITIAL_TURNOUT_PERCENT,
            connection_status: ConnectionStatus::default(),
            last_update: now,
            notifications: Vec::new(),
        }
    }

    /// Apply one vote tick. Turnout only grows and stops at the ceiling.
    pub fn apply_vote_tick(&mut self, tick: VoteTick, now: Timestamp) {
        self.total_votes = self.total_votes.saturating_add(tick.new_votes);
        self.active_voters = tick.active_voters;
        self.turnout_rate_percent =
            (self.turnout_rate_percent + tick.turnout_increase.max(0.0)).min(TURNOUT_CEILING);
        self.last_update = now;
    }

    /// Prepend `notification` and keep only the [`MAX_NOTIFICATIONS`] newest.
    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    /// Mark the notification with `id` read. Returns false for unknown ids.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Drop every notification. Returns how many were removed.
    pub fn clear_notifications(&mut self) -> usize {
        let removed = self.notifications.len();
        self.notifications.clear();
        removed
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn notification(id: &str) -> Notification {
        Notification::from_template(NotificationTemplate::system_status(), id.to_string(), 0)
    }

    #[test]
    fn test_initial_state() {
        let state = RealtimeState::new(5);
        assert_eq!(state.total_votes, 1247);
        assert_eq!(state.active_voters, 23);
        assert_eq!(state.turnout_rate_percent, 68.3);
        assert_eq!(state.connection_status, ConnectionStatus::Connecting);
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn test_catalog_contents() {
        let titles: Vec<_> = notification_catalog().into_iter().map(|t| t.title).collect();
        assert_eq!(
            titles,
            ["New Vote Recorded", "QR Verification Complete", "System Status Update"]
        );
    }

    #[test]
    fn test_vote_tick() {
        let mut state = RealtimeState::new(0);
        state.apply_vote_tick(
            VoteTick {
                new_votes: 2,
                active_voters: 31,
                turnout_increase: 0.05,
            },
            5_000,
        );

        assert_eq!(state.total_votes, 1249);
        assert_eq!(state.active_voters, 31);
        assert!((state.turnout_rate_percent - 68.35).abs() < 1e-9);
        assert_eq!(state.last_update, 5_000);
    }

    #[test]
    fn test_turnout_clamped_at_ceiling() {
        let mut state = RealtimeState::new(0);
        state.turnout_rate_percent = 99.97;
        state.apply_vote_tick(
            VoteTick {
                new_votes: 0,
                active_voters: 10,
                turnout_increase: 0.09,
            },
            1,
        );
        assert_eq!(state.turnout_rate_percent, TURNOUT_CEILING);
    }

    #[test]
    fn test_mark_read_and_clear() {
        let mut state = RealtimeState::new(0);
        state.push_notification(notification("a"));
        state.push_notification(notification("b"));
        assert_eq!(state.unread_count(), 2);

        assert!(state.mark_read("a"));
        assert!(!state.mark_read("zzz"));
        assert_eq!(state.unread_count(), 1);

        assert_eq!(state.clear_notifications(), 2);
        assert_eq!(state.clear_notifications(), 0);
        assert!(state.notifications.is_empty());
    }

    proptest! {
        #[test]
        fn prop_notifications_capped_newest_first(n in 0usize..80) {
            let mut state = RealtimeState::new(0);
            for i in 0..n {
                state.push_notification(notification(&i.to_string()));
                prop_assert!(state.notifications.len() <= MAX_NOTIFICATIONS);
            }
            let ids: Vec<usize> = state
                .notifications
                .iter()
                .map(|n| n.id.parse().unwrap())
                .collect();
            prop_assert!(ids.windows(2).all(|w| w[0] > w[1]));
        }

        #[test]
        fn prop_turnout_non_decreasing(incs in prop::collection::vec(0.0f64..0.1, 0..500)) {
            let mut state = RealtimeState::new(0);
            let mut last = state.turnout_rate_percent;
            for inc in incs {
                state.apply_vote_tick(VoteTick { new_votes: 0, active_voters: 10, turnout_increase: inc }, 0);
                prop_assert!(state.turnout_rate_percent >= last);
                prop_assert!(state.turnout_rate_percent <= TURNOUT_CEILING);
                last = state.turnout_rate_percent;
            }
        }
    }
}
