//! Record creation and validation.

use super::entities::{Payload, QrRecord, QR_EXPIRY_MS};
use super::errors::QrError;
use super::signature::pseudo_signature;
use crate::ports::QrCodecApi;
use shared_types::{QrKind, Timestamp};

/// Stateless QR record codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodec;

impl QrCodec {
    pub fn new() -> Self {
        Self
    }
}

impl QrCodecApi for QrCodec {
    fn create(&self, kind: QrKind, payload: Payload, now: Timestamp) -> QrRecord {
        let pseudo_signature = pseudo_signature(kind, &payload, now);
        QrRecord {
            kind,
            payload,
            created_at_millis: now,
            pseudo_signature,
        }
    }

    fn check(&self, record: &QrRecord, now: Timestamp) -> Result<(), QrError> {
        let age_ms = record.age_ms(now);
        if age_ms > QR_EXPIRY_MS {
            return Err(QrError::Expired {
                age_ms,
                limit_ms: QR_EXPIRY_MS,
            });
        }

        let expected = pseudo_signature(record.kind, &record.payload, record.created_at_millis);
        if expected != record.pseudo_signature {
            return Err(QrError::SignatureMismatch {
                expected,
                found: record.pseudo_signature.clone(),
            });
        }
        Ok(())
    }
}
