//! Simulated QR generation.

use shared_bus::{DemoEvent, EventPublisher};
use shared_types::{AuthMethod, Delay, QrKind, RandomSource, TimeSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::domain::{
    generate_session_id, generate_vote_id, qr_code_url, AuthPayload, Payload, QrCodec, QrRecord,
    QrTimingConfig, VotePayload,
};
use crate::ports::QrCodecApi;

/// A generated record together with the URL shown in its place.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedQr {
    pub record: QrRecord,
    pub code_url: String,
}

/// Generates records after a fixed artificial delay.
pub struct QrIssuer {
    codec: QrCodec,
    time: Arc<dyn TimeSource>,
    delay: Arc<dyn Delay>,
    rng: Arc<dyn RandomSource>,
    publisher: Arc<dyn EventPublisher>,
    generation_delay: Duration,
}

impl QrIssuer {
    pub fn new(
        time: Arc<dyn TimeSource>,
        delay: Arc<dyn Delay>,
        rng: Arc<dyn RandomSource>,
        publisher: Arc<dyn EventPublisher>,
        config: &QrTimingConfig,
    ) -> Self {
        Self {
            codec: QrCodec::new(),
            time,
            delay,
            rng,
            publisher,
            generation_delay: config.generation_delay,
        }
    }

    /// Wait out the generation delay, then stamp and sign the record.
    pub async fn issue(&self, kind: QrKind, payload: Payload) -> IssuedQr {
        self.delay.sleep(self.generation_delay).await;

        let record = self.codec.create(kind, payload, self.time.now());
        let code_url = qr_code_url(&record);

        info!(
            kind = %kind,
            signature = %record.pseudo_signature,
            "Issued QR record"
        );
        self.publisher
            .publish(DemoEvent::QrIssued {
                kind,
                pseudo_signature: record.pseudo_signature.clone(),
                created_at_millis: record.created_at_millis,
            })
            .await;

        IssuedQr { record, code_url }
    }

    /// Issue an `AUTH` record with a fresh session id.
    pub async fn issue_auth(&self, user_id: &str, method: AuthMethod) -> IssuedQr {
        let session_id = generate_session_id(self.time.now(), self.rng.as_ref());
        let payload = AuthPayload {
            user_id: user_id.to_string(),
            method,
            session_id,
        };
        self.issue(QrKind::Auth, payload.into_payload()).await
    }

    /// Issue a `VOTE` record with a fresh vote id.
    pub async fn issue_vote(&self, candidate_id: &str, election_id: &str) -> IssuedQr {
        let now = self.time.now();
        let payload = VotePayload {
            candidate_id: candidate_id.to_string(),
            election_id: election_id.to_string(),
            vote_id: generate_vote_id(now, self.rng.as_ref()),
            encrypted_vote: format!("MATRAKSHAK_VOTE:{candidate_id}:{now}"),
        };
        self.issue(QrKind::Vote, payload.into_payload()).await
    }
}
