//! Metrics handler: folds bus events into Prometheus collectors.

use mk_telemetry::{
    log_event, metric_inc, ACTIVE_VOTERS, DEVICE_COMPLIANCE, EVENT_BUS_MESSAGES_RECEIVED,
    NOTIFICATIONS_PUSHED, QR_ISSUED, QR_SCANS, SECURE_MODE_ACTIVE, SECURITY_ALERTS, TOTAL_VOTES,
    TURNOUT_RATE,
};
use shared_bus::{DemoEvent, Subscription};

/// Updates metrics for every event it receives.
pub struct MetricsHandler {
    subscription: Subscription,
}

impl MetricsHandler {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until the bus closes.
    pub async fn run(mut self) {
        log_event!(info, "runtime", "Metrics handler started");
        while let Some(event) = self.subscription.recv().await {
            Self::record(&event);
        }
        log_event!(debug, "runtime", "Metrics handler stopped: bus closed");
    }

    /// Apply one event to the collectors.
    pub fn record(event: &DemoEvent) {
        metric_inc!(EVENT_BUS_MESSAGES_RECEIVED, &[event.topic().label()]);

        match event {
            DemoEvent::QrIssued { kind, .. } => metric_inc!(QR_ISSUED, &[kind.as_str()]),
            DemoEvent::QrScanned { outcome, .. } => metric_inc!(QR_SCANS, &[outcome.label()]),
            DemoEvent::SecureModeChanged { enabled } => {
                SECURE_MODE_ACTIVE.set(if *enabled { 1.0 } else { 0.0 });
            }
            DemoEvent::SecurityAlertRaised { severity, .. } => {
                metric_inc!(SECURITY_ALERTS, &[severity.as_str()]);
            }
            DemoEvent::SecurityChecked {
                device_compliance_percent,
                ..
            } => DEVICE_COMPLIANCE.set(*device_compliance_percent),
            DemoEvent::VoteStatsUpdated {
                total_votes,
                active_voters,
                turnout_rate_percent,
            } => {
                TOTAL_VOTES.set(*total_votes as f64);
                ACTIVE_VOTERS.set(f64::from(*active_voters));
                TURNOUT_RATE.set(*turnout_rate_percent);
            }
            DemoEvent::NotificationPushed { category, .. } => {
                metric_inc!(NOTIFICATIONS_PUSHED, &[category.as_str()]);
            }
            DemoEvent::SecurityAlertResolved { .. }
            | DemoEvent::NotificationRead { .. }
            | DemoEvent::NotificationsCleared { .. }
            | DemoEvent::ConnectionStatusChanged { .. } => {}
        }
    }
}
