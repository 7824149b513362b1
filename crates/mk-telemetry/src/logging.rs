//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` registry with an `EnvFilter` and
//! one fmt layer. Human-readable output by default; JSON lines when
//! `json_logs` is set, with these fields on every line:
//! - `timestamp`, `level`, `target`
//! - `fields.message` and any event fields (including `subsystem` when
//!   logged through [`log_event!`](crate::log_event))

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Build the filter from `config.log_level`.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(format!("invalid log filter {:?}: {e}", config.log_level)))
}

/// Install the global subscriber.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let result = if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    result.map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Structured logging configured"
    );
    Ok(())
}

/// Log an event with a `subsystem` field.
///
/// ```rust,ignore
/// log_event!(info, "security-monitor", "Secure mode enabled", alert_id = %id);
/// ```
#[macro_export]
macro_rules! log_event {
    (info, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::info!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::warn!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (error, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::error!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $subsystem:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::__tracing::debug!(
            subsystem = $subsystem,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let config = TelemetryConfig {
            log_level: "info,mk_runtime=debug".into(),
            ..TelemetryConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_filter_rejects_garbage() {
        let config = TelemetryConfig {
            log_level: "mk_runtime=loudest".into(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(build_filter(&config), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_log_event_expands() {
        let id = "abc";
        log_event!(info, "test", "plain");
        log_event!(debug, "test", "with fields", alert_id = %id, count = 3);
    }
}
