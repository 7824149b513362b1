//! # Integration Test Flows
//!
//! Tests that the QR scanner, the security monitor and the realtime feed
//! publish through one shared bus without touching each other's state.
//!
//! ## Flows Tested:
//!
//! 1. **Scan taxonomy → bus**: every scan failure kind surfaces as an outcome
//! 2. **Secure mode round trip**: one info alert, lockdown cleared on disable
//! 3. **Store isolation**: topic filters see only their own store
//! 4. **Independent tickers**: security and feed timers never interfere

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use mk_01_qr_codec::{QrScanApi, ScanError};
    use mk_02_security_monitor::{SecurityMonitorApi, MAX_ALERTS, SECURE_MODE_ALERT};
    use mk_03_realtime_feed::{RealtimeFeedApi, MAX_NOTIFICATIONS};
    use mk_runtime::{DemoContainer, RuntimeConfig};
    use shared_bus::{DemoEvent, EventFilter, EventTopic, ScanOutcome};
    use shared_types::{
        AlertSeverity, InstantDelay, ManualTimeSource, QrKind, ScriptedRandom, TokioDelay,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn fast_container(draw: f64) -> DemoContainer {
        DemoContainer::with_ports(
            RuntimeConfig::default(),
            Arc::new(ManualTimeSource::new(1_700_000_000_000)),
            Arc::new(InstantDelay),
            Arc::new(ScriptedRandom::constant(draw)),
        )
    }

    fn scan_outcomes(events: Vec<DemoEvent>) -> Vec<ScanOutcome> {
        events
            .into_iter()
            .filter_map(|event| match event {
                DemoEvent::QrScanned { outcome, .. } => Some(outcome),
                _ => None,
            })
            .collect()
    }

    // =============================================================================
    // SCANNER → EVENT BUS
    // =============================================================================

    #[tokio::test]
    async fn test_scan_failures_surface_as_bus_outcomes() {
        let container = fast_container(0.5);
        let mut qr_events = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Qr]));
        let scanner = &container.scanner;

        let accepted = scanner
            .scan_expecting("qr://AUTH/abc", Some(QrKind::Auth))
            .await
            .unwrap();
        assert_eq!(accepted.kind, QrKind::Auth);

        assert_eq!(
            scanner.scan_expecting("qr://nothing", None).await,
            Err(ScanError::MalformedScan)
        );
        assert_eq!(
            scanner
                .scan_expecting("qr://VOTE/abc", Some(QrKind::Auth))
                .await,
            Err(ScanError::TypeMismatch {
                expected: QrKind::Auth,
                actual: QrKind::Vote,
            })
        );

        assert_eq!(
            scan_outcomes(qr_events.drain()),
            vec![
                ScanOutcome::Accepted(QrKind::Auth),
                ScanOutcome::Malformed,
                ScanOutcome::TypeMismatch(QrKind::Vote),
            ]
        );
    }

    #[tokio::test]
    async fn test_issued_code_scans_back_as_same_kind() {
        let container = fast_container(0.5);

        let issued = container
            .issuer
            .issue_vote("candidate-2", "election-2024")
            .await;
        let scanned = container
            .scanner
            .simulate_scan(&issued.code_url)
            .await
            .unwrap();

        assert_eq!(scanned.kind, QrKind::Vote);
        assert!(container.scanner.verify(&issued.record, Some(QrKind::Vote)).is_ok());
    }

    // =============================================================================
    // SECURITY MONITOR
    // =============================================================================

    #[tokio::test]
    async fn test_secure_mode_round_trip_adds_one_info_alert() {
        let container = fast_container(0.5);
        let security = &container.security;
        let before = security.snapshot().alerts.len();

        security.enable_secure_mode().await;
        security.disable_secure_mode().await;

        let state = security.snapshot();
        assert!(!state.secure_mode_enabled);
        assert!(!state.kernel_lockdown_active);
        assert_eq!(state.alerts.len(), before + 1);
        assert_eq!(state.alerts[0].severity, AlertSeverity::Info);
        assert_eq!(state.alerts[0].message, SECURE_MODE_ALERT);
    }

    #[tokio::test]
    async fn test_alert_and_notification_caps_hold_together() {
        let container = fast_container(0.9);

        for i in 0..(MAX_ALERTS * 2) {
            container
                .security
                .add_alert(AlertSeverity::Warning, &format!("alert {i}"))
                .await;
        }
        for _ in 0..(MAX_NOTIFICATIONS * 2) {
            assert!(container.feed.tick_notifications().await.is_some());
        }

        let alerts = container.security.snapshot().alerts;
        assert_eq!(alerts.len(), MAX_ALERTS);
        assert_eq!(alerts[0].message, format!("alert {}", MAX_ALERTS * 2 - 1));
        assert_eq!(container.feed.snapshot().notifications.len(), MAX_NOTIFICATIONS);
    }

    // =============================================================================
    // STORE ISOLATION
    // =============================================================================

    #[tokio::test]
    async fn test_topic_filters_only_see_their_store() {
        let container = fast_container(0.9);
        let mut security_events = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Security]));
        let mut realtime_events = container
            .event_bus
            .subscribe(EventFilter::topics(vec![EventTopic::Realtime]));

        container.security.tick().await;
        container.feed.tick_votes().await;
        container.feed.tick_notifications().await;

        let security = security_events.drain();
        let realtime = realtime_events.drain();
        assert_eq!(security.len(), 1);
        assert!(security.iter().all(|e| e.topic() == EventTopic::Security));
        assert_eq!(realtime.len(), 2);
        assert!(realtime.iter().all(|e| e.topic() == EventTopic::Realtime));
    }

    // =============================================================================
    // PERIODIC TICKERS
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_tickers_run_independently() {
        let container = DemoContainer::with_ports(
            RuntimeConfig::default(),
            Arc::new(ManualTimeSource::new(0)),
            Arc::new(TokioDelay),
            Arc::new(ScriptedRandom::constant(0.5)),
        );
        let mut events = container.event_bus.subscribe(EventFilter::all());

        let security = container.security.spawn_ticker();
        let votes = container.feed.spawn_vote_ticker();
        let notifications = container.feed.spawn_notification_ticker();
        tokio::time::sleep(Duration::from_secs(31)).await;
        votes.stop().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        security.stop().await;
        notifications.stop().await;

        let seen = events.drain();
        let checks = seen
            .iter()
            .filter(|e| matches!(e, DemoEvent::SecurityChecked { .. }))
            .count();
        let vote_updates = seen
            .iter()
            .filter(|e| matches!(e, DemoEvent::VoteStatsUpdated { .. }))
            .count();
        // Security kept ticking after the vote ticker stopped.
        assert_eq!(checks, 4);
        assert_eq!(vote_updates, 6);
    }
}
