//! # Demo Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Stores publish one event per state change after the change is applied.
//! Events are notifications only: no subscriber mutates another store
//! in response to them.

use serde::{Deserialize, Serialize};
use shared_types::entities::{
    AlertSeverity, ConnectionStatus, NetworkStatus, NotificationCategory, NotificationPriority,
    QrKind,
};

/// Subsystem identifiers used as event sources.
pub mod subsystem_ids {
    pub const QR_CODEC: u8 = 1;
    pub const SECURITY_MONITOR: u8 = 2;
    pub const REALTIME_FEED: u8 = 3;
}

/// Result of a scan attempt, mirroring the scan error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// Record decoded, kind matched, signature and expiry valid.
    Accepted(QrKind),
    /// Descriptor matched neither kind.
    Malformed,
    /// Record of the wrong kind was scanned.
    TypeMismatch(QrKind),
    /// Signature mismatch or expired record.
    ExpiredOrInvalid,
}

impl ScanOutcome {
    /// Short label used for metrics and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ScanOutcome::Accepted(_) => "accepted",
            ScanOutcome::Malformed => "malformed",
            ScanOutcome::TypeMismatch(_) => "type_mismatch",
            ScanOutcome::ExpiredOrInvalid => "expired_or_invalid",
        }
    }
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DemoEvent {
    // =========================================================================
    // SUBSYSTEM 1: QR CODEC
    // =========================================================================
    /// A QR record was generated for display.
    QrIssued {
        kind: QrKind,
        pseudo_signature: String,
        created_at_millis: u64,
    },

    /// A scan attempt finished.
    QrScanned {
        expected: Option<QrKind>,
        outcome: ScanOutcome,
    },

    // =========================================================================
    // SUBSYSTEM 2: SECURITY MONITOR
    // =========================================================================
    /// Secure mode was switched on or off.
    SecureModeChanged { enabled: bool },

    /// A security alert was prepended to the alert list.
    SecurityAlertRaised {
        alert_id: String,
        severity: AlertSeverity,
        message: String,
    },

    /// A security alert was marked resolved.
    SecurityAlertResolved { alert_id: String },

    /// Periodic or manual security check completed.
    SecurityChecked {
        device_compliance_percent: f64,
        network_status: NetworkStatus,
    },

    // =========================================================================
    // SUBSYSTEM 3: REALTIME FEED
    // =========================================================================
    /// Vote counters were refreshed.
    VoteStatsUpdated {
        total_votes: u64,
        active_voters: u32,
        turnout_rate_percent: f64,
    },

    /// A notification was prepended to the feed.
    NotificationPushed {
        notification_id: String,
        category: NotificationCategory,
        priority: NotificationPriority,
        title: String,
    },

    /// A notification was marked read.
    NotificationRead { notification_id: String },

    /// The notification list was emptied.
    NotificationsCleared { removed: usize },

    /// The feed connection changed state.
    ConnectionStatusChanged { status: ConnectionStatus },
}

impl DemoEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::QrIssued { .. } | Self::QrScanned { .. } => EventTopic::Qr,
            Self::SecureModeChanged { .. }
            | Self::SecurityAlertRaised { .. }
            | Self::SecurityAlertResolved { .. }
            | Self::SecurityChecked { .. } => EventTopic::Security,
            Self::VoteStatsUpdated { .. }
            | Self::NotificationPushed { .. }
            | Self::NotificationRead { .. }
            | Self::NotificationsCleared { .. }
            | Self::ConnectionStatusChanged { .. } => EventTopic::Realtime,
        }
    }

    /// Get the source subsystem ID for this event.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self.topic() {
            EventTopic::Qr => subsystem_ids::QR_CODEC,
            EventTopic::Security => subsystem_ids::SECURITY_MONITOR,
            EventTopic::Realtime => subsystem_ids::REALTIME_FEED,
        }
    }
}

/// Event topics for filtering subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// QR issuing and scanning.
    Qr,
    /// Secure mode, alerts, compliance checks.
    Security,
    /// Vote counters, notifications, connection state.
    Realtime,
}

impl EventTopic {
    /// Lowercase label used for metrics and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EventTopic::Qr => "qr",
            EventTopic::Security => "security",
            EventTopic::Realtime => "realtime",
        }
    }
}

/// Filter for event subscriptions.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means every topic.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_subsystems: Vec::new(),
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_subsystems: subsystems,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &DemoEvent) -> bool {
        let topic_match = self.topics.is_empty() || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        topic_match && source_match
    }
}
