//! Realtime feed configuration.

use std::time::Duration;

/// Tick cadences, notification odds and the simulated connect delay.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Period of the vote counter tick.
    pub vote_tick_interval: Duration,
    /// Period of the notification tick.
    pub notification_tick_interval: Duration,
    /// Chance that a notification tick pushes a notification.
    pub notification_probability: f64,
    /// Time spent in `Connecting` before `Connected`.
    pub connect_delay: Duration,
    /// New votes per tick are drawn from `0..max_new_votes_per_tick`.
    pub max_new_votes_per_tick: u64,
    /// Lowest active voter count a tick can report.
    pub min_active_voters: u32,
    /// Number of distinct active voter counts above the minimum.
    pub active_voter_spread: u32,
    /// Turnout grows by a uniform draw in `[0, max_turnout_increase)`.
    pub max_turnout_increase: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            vote_tick_interval: Duration::from_secs(5),
            notification_tick_interval: Duration::from_secs(15),
            notification_probability: 0.3,
            connect_delay: Duration::from_secs(2),
            max_new_votes_per_tick: 3,
            min_active_voters: 10,
            active_voter_spread: 30,
            max_turnout_increase: 0.1,
        }
    }
}
