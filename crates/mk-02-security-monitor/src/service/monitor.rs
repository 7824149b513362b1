//! Security Monitor Service
//!
//! Owns one [`SecurityState`] behind a lock. Every mutation takes the write
//! lock, applies a pure state transition, releases the lock and only then
//! publishes the matching event.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_bus::{DemoEvent, EventPublisher};
use shared_types::{short_id, AlertSeverity, PeriodicTask, RandomSource, TimeSource};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{SecurityAlert, SecurityMonitorConfig, SecurityState, SECURE_MODE_ALERT};
use crate::ports::SecurityMonitorApi;

/// Security state store.
pub struct SecurityMonitor {
    state: RwLock<SecurityState>,
    time: Arc<dyn TimeSource>,
    rng: Arc<dyn RandomSource>,
    publisher: Arc<dyn EventPublisher>,
    config: SecurityMonitorConfig,
}

impl SecurityMonitor {
    pub fn new(
        time: Arc<dyn TimeSource>,
        rng: Arc<dyn RandomSource>,
        publisher: Arc<dyn EventPublisher>,
        config: SecurityMonitorConfig,
    ) -> Self {
        let state = SecurityState::new(config.initial_compliance_percent, time.now());
        Self {
            state: RwLock::new(state),
            time,
            rng,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &SecurityMonitorConfig {
        &self.config
    }

    pub fn is_secure_mode_enabled(&self) -> bool {
        self.state.read().secure_mode_enabled
    }

    pub fn alerts(&self) -> Vec<SecurityAlert> {
        self.state.read().alerts.clone()
    }

    /// Run [`SecurityMonitorApi::tick`] every `tick_interval` until the
    /// returned handle is stopped or dropped.
    pub fn spawn_ticker(self: &Arc<Self>) -> PeriodicTask {
        let monitor = Arc::clone(self);
        PeriodicTask::spawn("security-tick", self.config.tick_interval, move || {
            let monitor = Arc::clone(&monitor);
            async move { monitor.tick().await }
        })
    }

    fn new_alert(&self, severity: AlertSeverity, message: &str) -> SecurityAlert {
        SecurityAlert {
            id: short_id(self.rng.as_ref()),
            severity,
            message: message.to_string(),
            created_at: self.time.now(),
            resolved: false,
        }
    }

    async fn publish_alert(&self, alert: &SecurityAlert) {
        self.publisher
            .publish(DemoEvent::SecurityAlertRaised {
                alert_id: alert.id.clone(),
                severity: alert.severity,
                message: alert.message.clone(),
            })
            .await;
    }

    async fn publish_check(&self) {
        let (device_compliance_percent, network_status) = {
            let state = self.state.read();
            (state.device_compliance_percent, state.network_status)
        };
        self.publisher
            .publish(DemoEvent::SecurityChecked {
                device_compliance_percent,
                network_status,
            })
            .await;
    }
}

#[async_trait]
impl SecurityMonitorApi for SecurityMonitor {
    async fn enable_secure_mode(&self) {
        let alert = self.new_alert(AlertSeverity::Info, SECURE_MODE_ALERT);
        {
            let mut state = self.state.write();
            state.set_secure_mode(true);
            state.push_alert(alert.clone());
        }
        info!(alert_id = %alert.id, "Secure voting mode enabled");

        self.publisher
            .publish(DemoEvent::SecureModeChanged { enabled: true })
            .await;
        self.publish_alert(&alert).await;
    }

    async fn disable_secure_mode(&self) {
        self.state.write().set_secure_mode(false);
        info!("Secure voting mode disabled");

        self.publisher
            .publish(DemoEvent::SecureModeChanged { enabled: false })
            .await;
    }

    async fn tick(&self) {
        let jitter = self.config.compliance_jitter;
        let delta = self.rng.uniform(-jitter, jitter);
        let warning = self.rng.chance(self.config.warning_probability);
        let now = self.time.now();

        let compliance = {
            let mut state = self.state.write();
            state.apply_check(delta, warning, now);
            state.device_compliance_percent
        };
        debug!(compliance, warning, "Security check");

        self.publish_check().await;
    }

    async fn refresh(&self) {
        let boost = self.rng.uniform(0.0, self.config.refresh_boost);
        let now = self.time.now();

        let compliance = {
            let mut state = self.state.write();
            state.apply_refresh(boost, now);
            state.device_compliance_percent
        };
        debug!(compliance, "Security status refreshed");

        self.publish_check().await;
    }

    async fn add_alert(&self, severity: AlertSeverity, message: &str) -> SecurityAlert {
        let alert = self.new_alert(severity, message);
        self.state.write().push_alert(alert.clone());
        debug!(alert_id = %alert.id, severity = severity.as_str(), "Security alert added");

        self.publish_alert(&alert).await;
        alert
    }

    async fn resolve_alert(&self, id: &str) -> bool {
        let resolved = self.state.write().resolve_alert(id);
        if !resolved {
            debug!(alert_id = id, "Resolve ignored: unknown alert");
            return false;
        }

        self.publisher
            .publish(DemoEvent::SecurityAlertResolved {
                alert_id: id.to_string(),
            })
            .await;
        true
    }

    fn snapshot(&self) -> SecurityState {
        self.state.read().clone()
    }
}
