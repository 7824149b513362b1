//! Security monitor configuration.

use super::entities::INITIAL_COMPLIANCE;
use std::time::Duration;

/// Tick cadence and jitter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityMonitorConfig {
    /// Period of the background compliance check.
    pub tick_interval: Duration,
    /// Compliance before the first check.
    pub initial_compliance_percent: f64,
    /// Compliance moves by a uniform draw in `[-jitter, +jitter)` per tick.
    pub compliance_jitter: f64,
    /// Chance that a tick reports a network warning.
    pub warning_probability: f64,
    /// Manual refresh adds a uniform draw in `[0, refresh_boost)`.
    pub refresh_boost: f64,
}

impl Default for SecurityMonitorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(10),
            initial_compliance_percent: INITIAL_COMPLIANCE,
            compliance_jitter: 1.0,
            warning_probability: 0.05,
            refresh_boost: 2.0,
        }
    }
}

impl SecurityMonitorConfig {
    /// Defaults with a custom tick period.
    #[must_use]
    pub fn with_tick_interval(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ..Self::default()
        }
    }
}
