//! Inbound (Driving) ports for the QR codec subsystem.

use async_trait::async_trait;
use shared_types::{QrKind, Timestamp};

use crate::domain::{Payload, QrError, QrRecord, ScanError};

/// Record creation and validation.
pub trait QrCodecApi: Send + Sync {
    /// Build a record stamped at `now`. Deterministic, never fails.
    fn create(&self, kind: QrKind, payload: Payload, now: Timestamp) -> QrRecord;

    /// Detailed validation: expiry first, then signature.
    fn check(&self, record: &QrRecord, now: Timestamp) -> Result<(), QrError>;

    /// True only if the record is unexpired and its signature matches.
    fn validate(&self, record: &QrRecord, now: Timestamp) -> bool {
        self.check(record, now).is_ok()
    }
}

/// Simulated scanning.
///
/// There is no camera input: scanning inspects a descriptor string
/// (normally the placeholder code URL) for a kind tag.
#[async_trait]
pub trait QrScanApi: Send + Sync {
    /// Resolve a descriptor to a canned record, or `None` if it names no kind.
    async fn simulate_scan(&self, descriptor: &str) -> Option<QrRecord>;

    /// Scan, then check kind, expiry and signature.
    async fn scan_expecting(
        &self,
        descriptor: &str,
        expected: Option<QrKind>,
    ) -> Result<QrRecord, ScanError>;
}
