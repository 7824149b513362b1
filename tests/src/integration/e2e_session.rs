//! # End-to-End Session Tests
//!
//! Record lifecycle at the codec boundary, then a whole voter session
//! through the runtime with the bus recording every step.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use mk_01_qr_codec::{keys, Payload, QrCodec, QrCodecApi, QrRecord, QR_EXPIRY_MS};
    use mk_02_security_monitor::SecurityMonitorApi;
    use mk_03_realtime_feed::RealtimeFeedApi;
    use mk_runtime::{DemoContainer, DemoRuntime, RuntimeConfig};
    use shared_bus::{DemoEvent, EventFilter, ScanOutcome};
    use shared_types::{InstantDelay, ManualTimeSource, QrKind, ScriptedRandom};

    fn auth_payload() -> Payload {
        let mut payload = Payload::new();
        payload.insert(keys::USER_ID.into(), json!("VT-1"));
        payload.insert(keys::METHOD.into(), json!("voter-id"));
        payload.insert(keys::SESSION_ID.into(), json!("SES-1"));
        payload
    }

    // =============================================================================
    // RECORD LIFECYCLE
    // =============================================================================

    #[test]
    fn test_auth_record_lifecycle() {
        let codec = QrCodec::new();
        let record = codec.create(QrKind::Auth, auth_payload(), 1000);

        assert_eq!(record.kind, QrKind::Auth);
        assert_eq!(record.created_at_millis, 1000);
        assert_eq!(record.payload, auth_payload());
        assert!(codec.validate(&record, 1000));
        assert!(codec.validate(&record, 1000 + QR_EXPIRY_MS));
        assert!(!codec.validate(&record, 301_001));
    }

    #[test]
    fn test_record_survives_json_boundary() {
        let codec = QrCodec::new();
        let record = codec.create(QrKind::Auth, auth_payload(), 1000);

        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["kind"], "AUTH");
        assert_eq!(wire["createdAtMillis"], 1000);
        assert_eq!(wire["payload"]["sessionId"], "SES-1");

        let decoded: QrRecord = serde_json::from_value(wire).unwrap();
        assert!(codec.validate(&decoded, 2000));
    }

    #[test]
    fn test_tampered_payload_fails_validation() {
        let codec = QrCodec::new();
        let mut record = codec.create(QrKind::Auth, auth_payload(), 1000);
        record
            .payload
            .insert(keys::USER_ID.into(), json!("VT-2"));

        assert!(!codec.validate(&record, 1000));
    }

    // =============================================================================
    // FULL VOTER SESSION
    // =============================================================================

    #[derive(Debug, PartialEq)]
    enum Step {
        Issued(QrKind),
        Scanned(ScanOutcome),
        SecureMode(bool),
        Notified(String),
    }

    fn session_steps(events: Vec<DemoEvent>) -> Vec<Step> {
        events
            .into_iter()
            .filter_map(|event| match event {
                DemoEvent::QrIssued { kind, .. } => Some(Step::Issued(kind)),
                DemoEvent::QrScanned { outcome, .. } => Some(Step::Scanned(outcome)),
                DemoEvent::SecureModeChanged { enabled } => Some(Step::SecureMode(enabled)),
                DemoEvent::NotificationPushed { title, .. } => Some(Step::Notified(title)),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_voter_session_event_sequence() {
        let container = DemoContainer::with_ports(
            RuntimeConfig::default(),
            Arc::new(ManualTimeSource::new(1_700_000_000_000)),
            Arc::new(InstantDelay),
            Arc::new(ScriptedRandom::constant(0.25)),
        );
        let mut events = container.event_bus.subscribe(EventFilter::all());
        let runtime = DemoRuntime::with_container(container);

        let report = runtime.run_voter_session().await.unwrap();

        assert_eq!(
            session_steps(events.drain()),
            vec![
                Step::Issued(QrKind::Auth),
                Step::Scanned(ScanOutcome::Accepted(QrKind::Auth)),
                Step::Notified("QR Verification Complete".into()),
                Step::SecureMode(true),
                Step::Issued(QrKind::Vote),
                Step::Scanned(ScanOutcome::Accepted(QrKind::Vote)),
                Step::SecureMode(false),
                Step::Notified("New Vote Recorded".into()),
            ]
        );
        assert_eq!(report.candidate_id, "candidate-1");

        let container = runtime.container();
        let security = container.security.snapshot();
        assert!(!security.secure_mode_enabled);
        assert_eq!(security.alerts.len(), 1);
        assert_eq!(container.feed.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_sessions_use_fresh_vote_ids() {
        let runtime = DemoRuntime::new(RuntimeConfig {
            fast: true,
            seed: Some(99),
            ..RuntimeConfig::default()
        });

        let first = runtime.run_voter_session().await.unwrap();
        let second = runtime.run_voter_session().await.unwrap();

        assert_ne!(first.vote_id, second.vote_id);
        assert_eq!(runtime.container().feed.snapshot().notifications.len(), 4);
    }
}
