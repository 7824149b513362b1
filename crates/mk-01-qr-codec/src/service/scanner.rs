//! Simulated QR scanner.
//!
//! Stand-in for camera decoding: no image is read. A descriptor that
//! mentions `AUTH` or `VOTE` yields a canned record of that kind.

use async_trait::async_trait;
use serde_json::Value;
use shared_bus::{DemoEvent, EventPublisher, ScanOutcome};
use shared_types::{Delay, QrKind, TimeSource, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{keys, Payload, QrCodec, QrRecord, QrTimingConfig, ScanError};
use crate::ports::{QrCodecApi, QrScanApi};

/// Fixed mock values returned by a simulated scan.
pub mod canned {
    pub const AUTH_USER_ID: &str = "user123";
    pub const AUTH_METHOD: &str = "voter-id";
    pub const AUTH_SESSION_ID: &str = "session456";
    pub const VOTE_CANDIDATE_ID: &str = "candidate-1";
    pub const VOTE_ELECTION_ID: &str = "election-2024";
    pub const VOTE_ID: &str = "vote789";
    pub const VOTE_ENCRYPTED: &str = "encrypted_vote_data";
}

/// Simulated scanner with an artificial decode delay.
pub struct QrScanner {
    codec: QrCodec,
    time: Arc<dyn TimeSource>,
    delay: Arc<dyn Delay>,
    publisher: Arc<dyn EventPublisher>,
    scan_delay: Duration,
}

impl QrScanner {
    pub fn new(
        time: Arc<dyn TimeSource>,
        delay: Arc<dyn Delay>,
        publisher: Arc<dyn EventPublisher>,
        config: &QrTimingConfig,
    ) -> Self {
        Self {
            codec: QrCodec::new(),
            time,
            delay,
            publisher,
            scan_delay: config.scan_delay,
        }
    }

    /// Kind named by a descriptor. `AUTH` wins when both tags appear.
    #[must_use]
    pub fn detect_kind(descriptor: &str) -> Option<QrKind> {
        if descriptor.contains("AUTH") {
            Some(QrKind::Auth)
        } else if descriptor.contains("VOTE") {
            Some(QrKind::Vote)
        } else {
            None
        }
    }

    /// Canned record of `kind`, signed at `now`.
    #[must_use]
    pub fn canned_record(&self, kind: QrKind, now: Timestamp) -> QrRecord {
        let entries: &[(&str, &str)] = match kind {
            QrKind::Auth => &[
                (keys::USER_ID, canned::AUTH_USER_ID),
                (keys::METHOD, canned::AUTH_METHOD),
                (keys::SESSION_ID, canned::AUTH_SESSION_ID),
            ],
            QrKind::Vote => &[
                (keys::CANDIDATE_ID, canned::VOTE_CANDIDATE_ID),
                (keys::ELECTION_ID, canned::VOTE_ELECTION_ID),
                (keys::VOTE_ID, canned::VOTE_ID),
                (keys::ENCRYPTED_VOTE, canned::VOTE_ENCRYPTED),
            ],
        };
        let payload: Payload = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect();
        self.codec.create(kind, payload, now)
    }

    /// Kind check, then expiry and signature check, at the current time.
    pub fn verify(&self, record: &QrRecord, expected: Option<QrKind>) -> Result<(), ScanError> {
        if let Some(expected) = expected {
            if record.kind != expected {
                return Err(ScanError::TypeMismatch {
                    expected,
                    actual: record.kind,
                });
            }
        }
        self.codec
            .check(record, self.time.now())
            .map_err(ScanError::ExpiredOrInvalid)
    }
}

#[async_trait]
impl QrScanApi for QrScanner {
    async fn simulate_scan(&self, descriptor: &str) -> Option<QrRecord> {
        self.delay.sleep(self.scan_delay).await;

        let kind = Self::detect_kind(descriptor)?;
        let record = self.canned_record(kind, self.time.now());
        debug!(kind = %kind, "Simulated scan decoded canned record");
        Some(record)
    }

    async fn scan_expecting(
        &self,
        descriptor: &str,
        expected: Option<QrKind>,
    ) -> Result<QrRecord, ScanError> {
        let result = match self.simulate_scan(descriptor).await {
            None => Err(ScanError::MalformedScan),
            Some(record) => self.verify(&record, expected).map(|()| record),
        };

        let outcome = match &result {
            Ok(record) => ScanOutcome::Accepted(record.kind),
            Err(err) => {
                warn!(expected = ?expected, error = %err, "QR scan rejected");
                err.outcome()
            }
        };
        self.publisher
            .publish(DemoEvent::QrScanned { expected, outcome })
            .await;

        result
    }
}
