//! Inbound (Driving) port for the security monitor.

use async_trait::async_trait;
use shared_types::AlertSeverity;

use crate::domain::{SecurityAlert, SecurityState};

/// Operations consumers may invoke on the security store.
#[async_trait]
pub trait SecurityMonitorApi: Send + Sync {
    /// Turn secure mode and kernel lockdown on, and prepend an info alert.
    /// Repeated calls append repeated alerts.
    async fn enable_secure_mode(&self);

    /// Turn secure mode and kernel lockdown off. Alerts are kept.
    async fn disable_secure_mode(&self);

    /// Periodic compliance and network check.
    async fn tick(&self);

    /// Manual compliance refresh.
    async fn refresh(&self);

    /// Prepend a new alert and return it.
    async fn add_alert(&self, severity: AlertSeverity, message: &str) -> SecurityAlert;

    /// Mark an alert resolved. Unknown ids are ignored and return false.
    async fn resolve_alert(&self, id: &str) -> bool;

    /// Copy of the current state.
    fn snapshot(&self) -> SecurityState;
}
