//! Enhanced authentication flow built on issue and scan.
//!
//! ```text
//! Generate ──start()──→ Scan ──submit_scan() ok──→ Verify ──progress 100%──→ Complete
//!                        ↑  │
//!                        └──┘ scan rejected (stays in Scan)
//! ```
//!
//! The issued code carries a countdown. Once it reaches zero,
//! [`AuthVerification::refresh_if_expired`] issues a replacement.

use shared_types::{AuthMethod, Delay, QrKind, TimeSource, Timestamp};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::issuer::{IssuedQr, QrIssuer};
use super::scanner::QrScanner;
use crate::domain::{QrRecord, QrTimingConfig, ScanError};
use crate::ports::QrScanApi;

/// Position in the verification flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationStep {
    #[default]
    Generate,
    Scan,
    Verify,
    Complete,
}

#[derive(Debug, Error, PartialEq)]
pub enum VerificationError {
    #[error("verification is in step {0:?}, expected Scan")]
    NotReady(VerificationStep),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Drives one user through the authentication QR flow.
pub struct AuthVerification {
    issuer: Arc<QrIssuer>,
    scanner: Arc<QrScanner>,
    time: Arc<dyn TimeSource>,
    delay: Arc<dyn Delay>,
    config: QrTimingConfig,
    step: VerificationStep,
    subject: Option<(String, AuthMethod)>,
    issued: Option<IssuedQr>,
    issued_at: Timestamp,
    progress: u8,
    verified: Option<QrRecord>,
}

impl AuthVerification {
    pub fn new(
        issuer: Arc<QrIssuer>,
        scanner: Arc<QrScanner>,
        time: Arc<dyn TimeSource>,
        delay: Arc<dyn Delay>,
        config: QrTimingConfig,
    ) -> Self {
        Self {
            issuer,
            scanner,
            time,
            delay,
            config,
            step: VerificationStep::Generate,
            subject: None,
            issued: None,
            issued_at: 0,
            progress: 0,
            verified: None,
        }
    }

    /// Issue the authentication code and move to the scan step.
    pub async fn start(&mut self, user_id: &str, method: AuthMethod) -> &IssuedQr {
        self.subject = Some((user_id.to_string(), method));
        self.progress = 0;
        self.verified = None;
        self.step = VerificationStep::Generate;

        let issued = self.issuer.issue_auth(user_id, method).await;
        self.issued_at = self.time.now();
        self.step = VerificationStep::Scan;
        info!(user_id, method = %method, "Authentication code issued");
        self.issued.insert(issued)
    }

    /// Whole seconds left on the issued code's countdown.
    #[must_use]
    pub fn seconds_left(&self, now: Timestamp) -> u64 {
        if self.issued.is_none() {
            return 0;
        }
        let elapsed_secs = now.saturating_sub(self.issued_at) / 1000;
        self.config.code_lifetime.as_secs().saturating_sub(elapsed_secs)
    }

    /// Re-issue the code once its countdown hits zero. Returns whether a
    /// new code was issued.
    pub async fn refresh_if_expired(&mut self) -> bool {
        if self.step != VerificationStep::Scan || self.seconds_left(self.time.now()) > 0 {
            return false;
        }
        let Some((user_id, method)) = self.subject.clone() else {
            return false;
        };

        debug!(user_id = %user_id, "Authentication code countdown elapsed, re-issuing");
        let issued = self.issuer.issue_auth(&user_id, method).await;
        self.issued_at = self.time.now();
        self.issued = Some(issued);
        true
    }

    /// Scan expecting an `AUTH` record, then run the verification progress
    /// to completion. A rejected scan leaves the flow in the scan step.
    pub async fn submit_scan(&mut self, descriptor: &str) -> Result<QrRecord, VerificationError> {
        if self.step != VerificationStep::Scan {
            return Err(VerificationError::NotReady(self.step));
        }

        let record = self
            .scanner
            .scan_expecting(descriptor, Some(QrKind::Auth))
            .await?;

        self.step = VerificationStep::Verify;
        let increment = self.config.effective_step_percent();
        while self.progress < 100 {
            self.delay.sleep(self.config.verification_step_delay).await;
            self.progress = self.progress.saturating_add(increment).min(100);
            debug!(progress = self.progress, "Verification progress");
        }

        self.step = VerificationStep::Complete;
        self.verified = Some(record.clone());
        info!("Authentication verification complete");
        Ok(record)
    }

    pub fn step(&self) -> VerificationStep {
        self.step
    }

    /// Progress of the verify step, in percent.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn issued(&self) -> Option<&IssuedQr> {
        self.issued.as_ref()
    }

    pub fn verified(&self) -> Option<&QrRecord> {
        self.verified.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::InMemoryEventBus;
    use shared_types::{InstantDelay, ManualTimeSource, RecordingDelay, SeededRandom};
    use std::time::Duration;

    struct Fixture {
        flow: AuthVerification,
        time: Arc<ManualTimeSource>,
        progress_delay: Arc<RecordingDelay>,
    }

    fn fixture() -> Fixture {
        let time = Arc::new(ManualTimeSource::new(1_000));
        let bus = Arc::new(InMemoryEventBus::new());
        let config = QrTimingConfig::default();
        let issuer = Arc::new(QrIssuer::new(
            time.clone(),
            Arc::new(InstantDelay),
            Arc::new(SeededRandom::new(3)),
            bus.clone(),
            &config,
        ));
        let scanner = Arc::new(QrScanner::new(
            time.clone(),
            Arc::new(InstantDelay),
            bus,
            &config,
        ));
        let progress_delay = Arc::new(RecordingDelay::new());
        let flow = AuthVerification::new(
            issuer,
            scanner,
            time.clone(),
            progress_delay.clone(),
            config,
        );
        Fixture {
            flow,
            time,
            progress_delay,
        }
    }

    #[tokio::test]
    async fn test_full_flow_reaches_complete() {
        let mut f = fixture();
        assert_eq!(f.flow.step(), VerificationStep::Generate);

        let url = f.flow.start("VT-1", AuthMethod::VoterId).await.code_url.clone();
        assert_eq!(f.flow.step(), VerificationStep::Scan);

        let record = f.flow.submit_scan(&url).await.expect("verified");
        assert_eq!(record.kind, QrKind::Auth);
        assert_eq!(f.flow.step(), VerificationStep::Complete);
        assert_eq!(f.flow.progress(), 100);
        assert_eq!(f.flow.verified(), Some(&record));
    }

    #[tokio::test]
    async fn test_progress_advances_in_fixed_steps() {
        let mut f = fixture();
        let url = f.flow.start("VT-1", AuthMethod::Email).await.code_url.clone();
        f.flow.submit_scan(&url).await.expect("verified");

        assert_eq!(f.progress_delay.calls(), vec![Duration::from_millis(500); 5]);
    }

    #[tokio::test]
    async fn test_scan_before_start_is_rejected() {
        let mut f = fixture();
        assert_eq!(
            f.flow.submit_scan("AUTH").await,
            Err(VerificationError::NotReady(VerificationStep::Generate))
        );
    }

    #[tokio::test]
    async fn test_wrong_kind_keeps_scan_step() {
        let mut f = fixture();
        f.flow.start("VT-1", AuthMethod::Phone).await;

        let err = f.flow.submit_scan("VOTE").await.unwrap_err();
        assert!(matches!(
            err,
            VerificationError::Scan(ScanError::TypeMismatch { .. })
        ));
        assert_eq!(f.flow.step(), VerificationStep::Scan);
        assert_eq!(f.flow.progress(), 0);
    }

    #[tokio::test]
    async fn test_countdown_and_reissue() {
        let mut f = fixture();
        let first = f.flow.start("VT-1", AuthMethod::VoterId).await.clone();
        assert_eq!(f.flow.seconds_left(f.time.now()), 300);

        f.time.advance(299_999);
        assert_eq!(f.flow.seconds_left(f.time.now()), 1);
        assert!(!f.flow.refresh_if_expired().await);

        f.time.advance(1);
        assert_eq!(f.flow.seconds_left(f.time.now()), 0);
        assert!(f.flow.refresh_if_expired().await);

        let second = f.flow.issued().expect("reissued");
        assert_ne!(second.record.created_at_millis, first.record.created_at_millis);
        assert_eq!(f.flow.seconds_left(f.time.now()), 300);
    }

    #[tokio::test]
    async fn test_no_reissue_after_completion() {
        let mut f = fixture();
        let url = f.flow.start("VT-1", AuthMethod::VoterId).await.code_url.clone();
        f.flow.submit_scan(&url).await.expect("verified");

        f.time.advance(600_000);
        assert!(!f.flow.refresh_if_expired().await);
    }
}
