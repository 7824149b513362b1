//! Pseudo-signature derivation.
//!
//! NOT CRYPTOGRAPHIC. The tag is a SHA-256 digest of the canonical JSON of
//! `(type, payload, timestamp)`, hex encoded and truncated. There is no
//! secret key: any party can alter a payload and recompute a matching tag.

use super::entities::Payload;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use shared_types::{QrKind, Timestamp};

/// Length of the pseudo-signature in hex characters.
pub const SIGNATURE_LEN: usize = 16;

/// Canonical signing input. Object keys are emitted in sorted order.
pub fn signing_input(kind: QrKind, payload: &Payload, created_at_millis: Timestamp) -> String {
    let mut object = Map::new();
    object.insert("type".into(), Value::String(kind.as_str().into()));
    object.insert(
        "payload".into(),
        Value::Object(payload.clone().into_iter().collect()),
    );
    object.insert("timestamp".into(), Value::from(created_at_millis));
    Value::Object(object).to_string()
}

/// Derive the pseudo-signature for a record's three signed fields.
pub fn pseudo_signature(kind: QrKind, payload: &Payload, created_at_millis: Timestamp) -> String {
    let digest = Sha256::digest(signing_input(kind, payload, created_at_millis).as_bytes());
    let mut tag = hex::encode(digest);
    tag.truncate(SIGNATURE_LEN);
    tag
}
