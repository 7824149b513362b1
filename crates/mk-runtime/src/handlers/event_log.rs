//! Event-flow log: one structured JSON line per bus event.

use mk_telemetry::log_event;
use shared_bus::{DemoEvent, Subscription};

/// Logs every event it receives.
pub struct EventLogHandler {
    subscription: Subscription,
}

impl EventLogHandler {
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Run until the bus closes.
    pub async fn run(mut self) {
        while let Some(event) = self.subscription.recv().await {
            log_event!(
                debug,
                "event-bus",
                "EVENT_FLOW_JSON",
                payload = %Self::render(&event, chrono::Utc::now())
            );
        }
    }

    /// JSON line for `event`, stamped with `at`.
    pub fn render(event: &DemoEvent, at: chrono::DateTime<chrono::Utc>) -> String {
        serde_json::json!({
            "timestamp": at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "source_subsystem": event.source_subsystem(),
            "topic": event.topic().label(),
            "event": event,
        })
        .to_string()
    }
}
