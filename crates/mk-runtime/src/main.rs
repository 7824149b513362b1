//! # Matrakshak Demo Runtime
//!
//! Runs the mock voting protocol core:
//!
//! ```text
//! QrIssuer/QrScanner(1) ──┐
//! SecurityMonitor(2) ─────┼──→ Event Bus ──→ MetricsHandler
//! RealtimeFeed(3) ────────┘                └─→ EventLogHandler
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (logs and metrics)
//! 2. Load configuration from the environment
//! 3. Start handlers and periodic tickers
//! 4. Run one scripted voter session
//! 5. Wait for Ctrl+C or `MK_RUN_FOR_SECS`, then shut down

use anyhow::{Context, Result};
use tracing::{error, info};

use mk_02_security_monitor::SecurityMonitorApi;
use mk_03_realtime_feed::RealtimeFeedApi;
use mk_runtime::{DemoRuntime, RuntimeConfig};
use mk_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = init_telemetry(TelemetryConfig::from_env())
        .context("Failed to initialize telemetry")?;

    let config = RuntimeConfig::from_env().context("Invalid runtime configuration")?;
    let run_for = config.run_for;

    let runtime = DemoRuntime::new(config);
    runtime.start();

    match runtime.run_voter_session().await {
        Ok(report) => info!(
            voter_id = %report.voter_id,
            vote_id = ?report.vote_id,
            signature = %report.vote_signature,
            "Vote recorded"
        ),
        Err(e) => error!("Voter session failed: {}", e),
    }

    match run_for {
        Some(duration) => {
            info!("Demo running for {}s", duration.as_secs());
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                res = tokio::signal::ctrl_c() => res.context("Failed to listen for Ctrl+C")?,
            }
        }
        None => {
            info!("Demo is running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl+C")?;
        }
    }

    runtime.shutdown().await;

    let container = runtime.container();
    info!(
        state = %serde_json::to_string(&container.security.snapshot())?,
        "Final security state"
    );
    info!(
        state = %serde_json::to_string(&container.feed.snapshot())?,
        "Final realtime state"
    );
    if telemetry.metrics_enabled() {
        info!("Final metrics:\n{}", encode_metrics()?);
    }

    Ok(())
}
