//! Telemetry configuration from environment variables.

use std::env;

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default service name attached to every log line.
pub const DEFAULT_SERVICE_NAME: &str = "matrakshak";

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name recorded on startup and in JSON logs
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive such as `mk_runtime=debug`)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable output
    pub json_logs: bool,

    /// Register Prometheus metrics on init
    pub metrics_enabled: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
            metrics_enabled: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MK_SERVICE_NAME`: Service name (default: matrakshak)
    /// - `MK_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `MK_JSON_LOGS`: JSON output (default: false)
    /// - `MK_METRICS`: Register metrics (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("MK_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("MK_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("MK_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.json_logs),

            metrics_enabled: lookup("MK_METRICS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }
}

/// `true`/`1`/`yes`/`on` (any case) are true, everything else false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
