//! # Matrakshak Telemetry
//!
//! Logging and metrics for the voting demo.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with `EnvFilter`, plain or JSON output
//! - **Metrics**: Prometheus collectors in a crate-local registry, exported
//!   as text with [`encode_metrics`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mk_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MK_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `MK_JSON_LOGS` | `false` | JSON log lines |
//! | `MK_SERVICE_NAME` | `matrakshak` | Service name |
//! | `MK_METRICS` | `true` | Register Prometheus metrics |

mod config;
mod logging;
mod metrics;

pub use config::{parse_flag, TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, ACTIVE_VOTERS, DEVICE_COMPLIANCE,
    EVENT_BUS_MESSAGES_RECEIVED, NOTIFICATIONS_PUSHED, QR_ISSUED, QR_SCANS, REGISTRY,
    SECURE_MODE_ACTIVE, SECURITY_ALERTS, TOTAL_VOTES, TURNOUT_RATE,
};

#[doc(hidden)]
pub use tracing as __tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early events are counted
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    init_logging(&config)?;
    tracing::info!(service = %config.service_name, "Telemetry initialized");

    Ok(TelemetryGuard {
        service_name: config.service_name,
        metrics,
    })
}

/// Guard that keeps telemetry active. Logs a final line on drop.
pub struct TelemetryGuard {
    service_name: String,
    metrics: Option<MetricsHandle>,
}

impl TelemetryGuard {
    pub fn metrics_enabled(&self) -> bool {
        self.metrics.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
