//! Security state entities and their pure mutations.
//!
//! Nothing here draws randomness or reads a clock. The service layer
//! supplies both, which keeps every transition reproducible in tests.

use serde::{Deserialize, Serialize};
use shared_types::{AlertSeverity, NetworkStatus, Timestamp};

/// Most recent alerts kept. Older ones are dropped on insert.
pub const MAX_ALERTS: usize = 10;

/// Lower bound of the tick-driven compliance walk.
pub const COMPLIANCE_FLOOR: f64 = 95.0;

/// Upper bound of device compliance.
pub const COMPLIANCE_CEILING: f64 = 100.0;

/// Compliance reported before the first check.
pub const INITIAL_COMPLIANCE: f64 = 98.5;

/// Alert prepended whenever secure mode is switched on.
pub const SECURE_MODE_ALERT: &str = "Secure voting mode activated - device locked down";

/// A security alert. Newest alerts come first in [`SecurityState::alerts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAlert {
    pub id: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub created_at: Timestamp,
    pub resolved: bool,
}

/// Process-local security state owned by one monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityState {
    pub secure_mode_enabled: bool,
    /// Mirrors `secure_mode_enabled`. Reported as a separate device policy.
    pub kernel_lockdown_active: bool,
    /// Always on in this model.
    pub encryption_active: bool,
    pub device_compliance_percent: f64,
    pub network_status: NetworkStatus,
    pub last_checked_at: Timestamp,
    pub alerts: Vec<SecurityAlert>,
}

impl SecurityState {
    pub fn new(initial_compliance: f64, now: Timestamp) -> Self {
        Self {
            secure_mode_enabled: false,
            kernel_lockdown_active: false,
            encryption_active: true,
            device_compliance_percent: initial_compliance.clamp(COMPLIANCE_FLOOR, COMPLIANCE_CEILING),
            network_status: NetworkStatus::Secure,
            last_checked_at: now,
            alerts: Vec::new(),
        }
    }

    /// Switch secure mode and the lockdown flag together.
    pub fn set_secure_mode(&mut self, enabled: bool) {
        self.secure_mode_enabled = enabled;
        self.kernel_lockdown_active = enabled;
    }

    /// Prepend `alert` and keep only the [`MAX_ALERTS`] newest.
    pub fn push_alert(&mut self, alert: SecurityAlert) {
        self.alerts.insert(0, alert);
        self.alerts.truncate(MAX_ALERTS);
    }

    /// Mark the alert with `id` resolved. Returns false for unknown ids.
    pub fn resolve_alert(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.resolved = true;
                true
            }
            None => false,
        }
    }

    /// Periodic check: shift compliance by `delta` within
    /// `[COMPLIANCE_FLOOR, COMPLIANCE_CEILING]` and set the network status.
    ///
    /// A warning is re-evaluated every tick, so the next tick without one
    /// reports `Secure` again.
    pub fn apply_check(&mut self, delta: f64, warning: bool, now: Timestamp) {
        self.device_compliance_percent = (self.device_compliance_percent + delta)
            .clamp(COMPLIANCE_FLOOR, COMPLIANCE_CEILING);
        self.network_status = if warning {
            NetworkStatus::Warning
        } else {
            NetworkStatus::Secure
        };
        self.last_checked_at = now;
    }

    /// Manual refresh: raise compliance by `boost`, capped at the ceiling.
    /// Network status is left untouched.
    pub fn apply_refresh(&mut self, boost: f64, now: Timestamp) {
        self.device_compliance_percent =
            (self.device_compliance_percent + boost).min(COMPLIANCE_CEILING);
        self.last_checked_at = now;
    }

    pub fn unresolved_alerts(&self) -> impl Iterator<Item = &SecurityAlert> {
        self.alerts.iter().filter(|a| !a.resolved)
    }
}
