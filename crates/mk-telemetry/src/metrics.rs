//! Prometheus metrics for the Matrakshak demo.
//!
//! All metrics follow the naming convention: `mk_<subsystem>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., qr_issued_total)
//! - **Gauge**: Value that can go up or down (e.g., device_compliance_percent)

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // QR CODEC METRICS (Subsystem 1)
    // =========================================================================

    /// QR records issued, by kind
    pub static ref QR_ISSUED: CounterVec = CounterVec::new(
        Opts::new("mk_qr_issued_total", "QR records issued"),
        &["kind"]  // kind: AUTH/VOTE
    ).expect("metric creation failed");

    /// QR scan attempts, by outcome
    pub static ref QR_SCANS: CounterVec = CounterVec::new(
        Opts::new("mk_qr_scans_total", "QR scan attempts"),
        &["outcome"]  // outcome: accepted/malformed/type_mismatch/expired_or_invalid
    ).expect("metric creation failed");

    // =========================================================================
    // SECURITY MONITOR METRICS (Subsystem 2)
    // =========================================================================

    /// Alerts raised, by severity
    pub static ref SECURITY_ALERTS: CounterVec = CounterVec::new(
        Opts::new("mk_security_alerts_total", "Security alerts raised"),
        &["severity"]
    ).expect("metric creation failed");

    /// 1 while secure mode is on
    pub static ref SECURE_MODE_ACTIVE: Gauge = Gauge::new(
        "mk_security_secure_mode_active",
        "Whether secure voting mode is enabled"
    ).expect("metric creation failed");

    /// Last reported device compliance
    pub static ref DEVICE_COMPLIANCE: Gauge = Gauge::new(
        "mk_security_device_compliance_percent",
        "Device compliance reported by the last security check"
    ).expect("metric creation failed");

    // =========================================================================
    // REALTIME FEED METRICS (Subsystem 3)
    // =========================================================================

    /// Notifications pushed, by category
    pub static ref NOTIFICATIONS_PUSHED: CounterVec = CounterVec::new(
        Opts::new("mk_realtime_notifications_total", "Notifications pushed to the feed"),
        &["category"]
    ).expect("metric creation failed");

    /// Running vote total
    pub static ref TOTAL_VOTES: Gauge = Gauge::new(
        "mk_realtime_total_votes",
        "Total votes reported by the realtime feed"
    ).expect("metric creation failed");

    /// Active voters at the last tick
    pub static ref ACTIVE_VOTERS: Gauge = Gauge::new(
        "mk_realtime_active_voters",
        "Active voters reported by the realtime feed"
    ).expect("metric creation failed");

    /// Turnout at the last tick
    pub static ref TURNOUT_RATE: Gauge = Gauge::new(
        "mk_realtime_turnout_percent",
        "Turnout rate reported by the realtime feed"
    ).expect("metric creation failed");

    // =========================================================================
    // EVENT BUS METRICS
    // =========================================================================

    /// Messages received from the event bus
    pub static ref EVENT_BUS_MESSAGES_RECEIVED: CounterVec = CounterVec::new(
        Opts::new("mk_eventbus_messages_received_total", "Messages received from event bus"),
        &["topic"]
    ).expect("metric creation failed");
}

/// Handle proving metrics were registered.
#[derive(Debug)]
pub struct MetricsHandle {
    registered: usize,
}

impl MetricsHandle {
    /// Number of collectors newly registered by this call.
    pub fn registered(&self) -> usize {
        self.registered
    }
}

/// Register all metrics with the global registry.
///
/// Collectors that are already registered are skipped, so calling this
/// more than once is harmless.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // QR codec
        Box::new(QR_ISSUED.clone()),
        Box::new(QR_SCANS.clone()),
        // Security
        Box::new(SECURITY_ALERTS.clone()),
        Box::new(SECURE_MODE_ACTIVE.clone()),
        Box::new(DEVICE_COMPLIANCE.clone()),
        // Realtime
        Box::new(NOTIFICATIONS_PUSHED.clone()),
        Box::new(TOTAL_VOTES.clone()),
        Box::new(ACTIVE_VOTERS.clone()),
        Box::new(TURNOUT_RATE.clone()),
        // Event Bus
        Box::new(EVENT_BUS_MESSAGES_RECEIVED.clone()),
    ];

    let mut registered = 0;
    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) => registered += 1,
            Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
