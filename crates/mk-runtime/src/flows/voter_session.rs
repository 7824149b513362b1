//! # Voter Session
//!
//! One scripted pass through the demo, touching every subsystem:
//!
//! ```text
//! login ──→ AUTH code issued ──→ scan + verify ──→ "QR Verification Complete"
//!                                                        │
//!          ┌─────────────── secure mode ON ◄─────────────┘
//!          ↓
//!   VOTE code issued ──→ scan + verify ──→ secure mode OFF ──→ "New Vote Recorded"
//! ```
//!
//! Secure mode is switched off again whether or not the vote scan succeeds.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use mk_01_qr_codec::{
    keys, AuthVerification, QrIssuer, QrRecord, QrScanApi, QrScanner, ScanError,
    VerificationError,
};
use mk_02_security_monitor::SecurityMonitorApi;
use mk_03_realtime_feed::{NotificationTemplate, RealtimeFeedApi};
use shared_types::{Delay, QrKind};

use crate::container::{DemoContainer, SessionConfig};

/// Why a voter session stopped early.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("authentication failed: {0}")]
    Verification(#[from] VerificationError),

    #[error("vote scan failed: {0}")]
    VoteScan(#[from] ScanError),
}

/// What a completed session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub voter_id: String,
    /// Session id carried by the issued authentication code.
    pub auth_session_id: Option<String>,
    pub vote_id: Option<String>,
    pub vote_signature: String,
    pub candidate_id: String,
    pub election_id: String,
}

/// Drives one voter from login to a recorded vote.
pub struct VoterSession {
    config: SessionConfig,
    delay: Arc<dyn Delay>,
    verification: AuthVerification,
    issuer: Arc<QrIssuer>,
    scanner: Arc<QrScanner>,
    security: Arc<dyn SecurityMonitorApi>,
    feed: Arc<dyn RealtimeFeedApi>,
}

impl VoterSession {
    pub fn new(container: &DemoContainer) -> Self {
        Self {
            config: container.config.session.clone(),
            delay: Arc::clone(&container.delay),
            verification: container.auth_verification(),
            issuer: Arc::clone(&container.issuer),
            scanner: Arc::clone(&container.scanner),
            security: container.security.clone(),
            feed: container.feed.clone(),
        }
    }

    pub async fn run(mut self) -> Result<SessionReport, SessionError> {
        let voter_id = self.config.voter_id.clone();
        info!(voter_id = %voter_id, method = %self.config.auth_method, "Voter logging in");
        self.delay.sleep(self.config.login_delay).await;

        let auth_record = self.authenticate().await?;
        self.feed
            .send_notification(NotificationTemplate::verification_complete())
            .await;

        self.security.enable_secure_mode().await;
        let cast = self.cast_vote().await;
        self.security.disable_secure_mode().await;

        let vote_record = match cast {
            Ok(record) => record,
            Err(err) => {
                warn!(voter_id = %voter_id, error = %err, "Vote was not recorded");
                return Err(err);
            }
        };
        self.feed
            .send_notification(NotificationTemplate::vote_recorded())
            .await;

        let report = SessionReport {
            voter_id,
            auth_session_id: auth_record.payload_str(keys::SESSION_ID).map(str::to_owned),
            vote_id: vote_record.payload_str(keys::VOTE_ID).map(str::to_owned),
            vote_signature: vote_record.pseudo_signature,
            candidate_id: self.config.candidate_id,
            election_id: self.config.election_id,
        };
        info!(
            vote_id = ?report.vote_id,
            signature = %report.vote_signature,
            "Voter session complete"
        );
        Ok(report)
    }

    /// Issue the AUTH code and verify it. Returns the issued record.
    async fn authenticate(&mut self) -> Result<QrRecord, SessionError> {
        let code_url = self
            .verification
            .start(&self.config.voter_id, self.config.auth_method)
            .await
            .code_url
            .clone();
        self.verification.submit_scan(&code_url).await?;

        Ok(self
            .verification
            .issued()
            .map(|issued| issued.record.clone())
            .ok_or(VerificationError::NotReady(self.verification.step()))?)
    }

    /// Issue the VOTE code, scan it and check the issued record itself.
    async fn cast_vote(&self) -> Result<QrRecord, SessionError> {
        let issued = self
            .issuer
            .issue_vote(&self.config.candidate_id, &self.config.election_id)
            .await;
        self.scanner
            .scan_expecting(&issued.code_url, Some(QrKind::Vote))
            .await?;
        self.scanner.verify(&issued.record, Some(QrKind::Vote))?;
        Ok(issued.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::RuntimeConfig;
    use async_trait::async_trait;
    use shared_bus::{DemoEvent, EventFilter, EventTopic};
    use shared_types::{InstantDelay, ManualTimeSource, ScriptedRandom, TimeSource};
    use std::time::Duration;

    fn container_with(delay: Arc<dyn Delay>, time: Arc<ManualTimeSource>) -> DemoContainer {
        DemoContainer::with_ports(
            RuntimeConfig::default(),
            time,
            delay,
            Arc::new(ScriptedRandom::constant(0.5)),
        )
    }

    /// Advances the manual clock past the code lifetime on every sleep.
    struct AgingDelay {
        time: Arc<ManualTimeSource>,
    }

    #[async_trait]
    impl Delay for AgingDelay {
        async fn sleep(&self, _duration: Duration) {
            self.time.advance(301_000);
        }
    }

    #[tokio::test]
    async fn test_session_records_vote() {
        let time = Arc::new(ManualTimeSource::new(1_700_000_000_000));
        let container = container_with(Arc::new(InstantDelay), Arc::clone(&time));
        let mut security_events = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Security]));

        let report = VoterSession::new(&container).run().await.unwrap();

        assert_eq!(report.voter_id, "VT-2024-001");
        assert_eq!(report.candidate_id, "candidate-1");
        assert!(report.vote_id.as_deref().unwrap().starts_with("VT-"));
        assert!(report.auth_session_id.as_deref().unwrap().starts_with("SES-"));
        assert_eq!(report.vote_signature.len(), 16);

        let titles: Vec<String> = container
            .feed
            .notifications()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["New Vote Recorded", "QR Verification Complete"]);

        let toggles: Vec<bool> = security_events
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                DemoEvent::SecureModeChanged { enabled } => Some(enabled),
                _ => None,
            })
            .collect();
        assert_eq!(toggles, vec![true, false]);
        assert!(!container.security.is_secure_mode_enabled());
        assert_eq!(time.now(), 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_expired_vote_code_still_leaves_secure_mode() {
        let time = Arc::new(ManualTimeSource::new(1_700_000_000_000));
        let delay = Arc::new(AgingDelay {
            time: Arc::clone(&time),
        });
        let container = container_with(delay, time);

        let err = VoterSession::new(&container).run().await.unwrap_err();

        assert!(matches!(err, SessionError::VoteScan(ScanError::ExpiredOrInvalid(_))));
        assert!(!container.security.is_secure_mode_enabled());
        let titles: Vec<String> = container
            .feed
            .notifications()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["QR Verification Complete"]);
    }
}
