//! QR record entities.
//!
//! A [`QrRecord`] is the logical payload a real QR code would carry. This
//! system never renders or decodes an image.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{AuthMethod, QrKind, Timestamp};
use std::collections::BTreeMap;

/// Records older than this are rejected by validation (5 minutes).
pub const QR_EXPIRY_MS: u64 = 300_000;

/// Free-form record payload. Ordered keys keep serialization canonical.
pub type Payload = BTreeMap<String, Value>;

/// Payload key names shared by every flow that builds or reads records.
pub mod keys {
    pub const USER_ID: &str = "userId";
    pub const METHOD: &str = "method";
    pub const SESSION_ID: &str = "sessionId";
    pub const CANDIDATE_ID: &str = "candidateId";
    pub const ELECTION_ID: &str = "electionId";
    pub const VOTE_ID: &str = "voteId";
    pub const ENCRYPTED_VOTE: &str = "encryptedVote";
}

/// Tagged QR record with its pseudo-signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRecord {
    pub kind: QrKind,
    pub payload: Payload,
    pub created_at_millis: Timestamp,
    /// Unkeyed digest prefix. Anyone can recompute it; it is not a MAC.
    pub pseudo_signature: String,
}

impl QrRecord {
    /// String value stored under `key`, if present and a string.
    #[must_use]
    pub fn payload_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Milliseconds elapsed since creation. Zero for future timestamps.
    #[must_use]
    pub fn age_ms(&self, now: Timestamp) -> u64 {
        now.saturating_sub(self.created_at_millis)
    }

    /// True once the record is past [`QR_EXPIRY_MS`].
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.age_ms(now) > QR_EXPIRY_MS
    }
}

/// Payload of an `AUTH` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub user_id: String,
    pub method: AuthMethod,
    pub session_id: String,
}

impl AuthPayload {
    #[must_use]
    pub fn into_payload(self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(keys::USER_ID.into(), Value::String(self.user_id));
        payload.insert(keys::METHOD.into(), Value::String(self.method.as_str().into()));
        payload.insert(keys::SESSION_ID.into(), Value::String(self.session_id));
        payload
    }

    /// Read the typed view back out of a generic payload.
    #[must_use]
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        let field = |key: &str| payload.get(key).and_then(Value::as_str);
        Some(Self {
            user_id: field(keys::USER_ID)?.to_string(),
            method: AuthMethod::parse(field(keys::METHOD)?)?,
            session_id: field(keys::SESSION_ID)?.to_string(),
        })
    }
}

/// Payload of a `VOTE` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotePayload {
    pub candidate_id: String,
    pub election_id: String,
    pub vote_id: String,
    /// Opaque placeholder, not ciphertext.
    pub encrypted_vote: String,
}

impl VotePayload {
    #[must_use]
    pub fn into_payload(self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(keys::CANDIDATE_ID.into(), Value::String(self.candidate_id));
        payload.insert(keys::ELECTION_ID.into(), Value::String(self.election_id));
        payload.insert(keys::VOTE_ID.into(), Value::String(self.vote_id));
        payload.insert(keys::ENCRYPTED_VOTE.into(), Value::String(self.encrypted_vote));
        payload
    }

    #[must_use]
    pub fn from_payload(payload: &Payload) -> Option<Self> {
        let field = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            candidate_id: field(keys::CANDIDATE_ID)?,
            election_id: field(keys::ELECTION_ID)?,
            vote_id: field(keys::VOTE_ID)?,
            encrypted_vote: field(keys::ENCRYPTED_VOTE)?,
        })
    }
}
