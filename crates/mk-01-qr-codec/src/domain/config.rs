//! Timing of the simulated QR flows.

use std::time::Duration;

/// Simulated delays for generation, scanning and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrTimingConfig {
    /// Wait before a generated record is available.
    pub generation_delay: Duration,
    /// Wait before a scan resolves.
    pub scan_delay: Duration,
    /// Wait between verification progress steps.
    pub verification_step_delay: Duration,
    /// Progress added per verification step (percent).
    pub verification_step_percent: u8,
    /// Countdown shown for an issued authentication code.
    pub code_lifetime: Duration,
}

impl Default for QrTimingConfig {
    fn default() -> Self {
        Self {
            generation_delay: Duration::from_secs(2),
            scan_delay: Duration::from_millis(1500),
            verification_step_delay: Duration::from_millis(500),
            verification_step_percent: 20,
            code_lifetime: Duration::from_secs(300),
        }
    }
}

impl QrTimingConfig {
    /// Step percent clamped into `1..=100` so progress always terminates.
    #[must_use]
    pub fn effective_step_percent(&self) -> u8 {
        self.verification_step_percent.clamp(1, 100)
    }
}
