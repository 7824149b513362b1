//! QR codec error types.

use shared_bus::ScanOutcome;
use shared_types::QrKind;
use thiserror::Error;

/// Why a record failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// Record is older than the expiry window.
    #[error("QR record expired: age {age_ms}ms exceeds {limit_ms}ms")]
    Expired { age_ms: u64, limit_ms: u64 },

    /// Stored pseudo-signature does not match the recomputed one.
    #[error("Pseudo-signature mismatch: expected {expected}, found {found}")]
    SignatureMismatch { expected: String, found: String },
}

/// Failure of a scan attempt. Every variant is recoverable by re-scanning
/// or re-generating the code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Descriptor matched neither record kind.
    #[error("Invalid QR code format")]
    MalformedScan,

    /// A record of the wrong kind was scanned.
    #[error("Expected {expected} QR code, but got {actual}")]
    TypeMismatch { expected: QrKind, actual: QrKind },

    /// Record failed expiry or signature validation.
    #[error("QR code has expired or is invalid")]
    ExpiredOrInvalid(#[source] QrError),
}

impl ScanError {
    /// Bus outcome describing this failure.
    #[must_use]
    pub fn outcome(&self) -> ScanOutcome {
        match self {
            ScanError::MalformedScan => ScanOutcome::Malformed,
            ScanError::TypeMismatch { actual, .. } => ScanOutcome::TypeMismatch(*actual),
            ScanError::ExpiredOrInvalid(_) => ScanOutcome::ExpiredOrInvalid,
        }
    }
}
