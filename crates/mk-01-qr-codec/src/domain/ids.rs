//! Vote/session identifiers and placeholder code URLs.

use super::entities::QrRecord;
use shared_types::{random_base36, to_base36, RandomSource, Timestamp};

/// Placeholder image endpoint standing in for a rendered QR code.
pub const QR_PLACEHOLDER_BASE: &str = "/placeholder.svg?height=200&width=200";

/// `VT-<TIME36>-<6 RANDOM>`.
pub fn generate_vote_id(now: Timestamp, rng: &dyn RandomSource) -> String {
    format!(
        "VT-{}-{}",
        to_base36(now).to_uppercase(),
        random_base36(rng, 6).to_uppercase()
    )
}

/// `SES-<TIME36>-<8 RANDOM>`.
pub fn generate_session_id(now: Timestamp, rng: &dyn RandomSource) -> String {
    format!(
        "SES-{}-{}",
        to_base36(now).to_uppercase(),
        random_base36(rng, 8).to_uppercase()
    )
}

/// Placeholder URL shown where the QR image would be.
///
/// The query names the kind, which is what simulated scanning keys on.
pub fn qr_code_url(record: &QrRecord) -> String {
    format!(
        "{QR_PLACEHOLDER_BASE}&query=QR code with encrypted data: {} - {}",
        record.kind, record.pseudo_signature
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Payload;
    use shared_types::{QrKind, ScriptedRandom};

    #[test]
    fn test_vote_id_format() {
        let rng = ScriptedRandom::constant(0.0);
        assert_eq!(generate_vote_id(1000, &rng), "VT-RS-000000");
    }

    #[test]
    fn test_session_id_format() {
        let rng = ScriptedRandom::constant(0.999);
        let id = generate_session_id(1_700_000_000_000, &rng);
        assert_eq!(id, "SES-LOYW3V28-ZZZZZZZZ");
    }

    #[test]
    fn test_qr_code_url_names_kind_and_signature() {
        let record = QrRecord {
            kind: QrKind::Vote,
            payload: Payload::new(),
            created_at_millis: 0,
            pseudo_signature: "0123456789abcdef".into(),
        };
        let url = qr_code_url(&record);
        assert!(url.starts_with("/placeholder.svg?"));
        assert!(url.ends_with("VOTE - 0123456789abcdef"));
    }
}
