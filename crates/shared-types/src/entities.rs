//! # Core Domain Tags
//!
//! Closed tag sets used across subsystems. Serialized names are the
//! lowercase wire tags of the record schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a QR record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QrKind {
    /// Voter authentication challenge.
    #[serde(rename = "AUTH")]
    Auth,
    /// Cast-vote receipt.
    #[serde(rename = "VOTE")]
    Vote,
}

impl QrKind {
    /// Wire tag of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QrKind::Auth => "AUTH",
            QrKind::Vote => "VOTE",
        }
    }
}

impl fmt::Display for QrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a voter identified themselves at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMethod {
    VoterId,
    Email,
    Phone,
}

impl AuthMethod {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::VoterId => "voter-id",
            AuthMethod::Email => "email",
            AuthMethod::Phone => "phone",
        }
    }

    /// Parse the wire tag (`voter-id`, `email`, `phone`).
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "voter-id" => Some(AuthMethod::VoterId),
            "email" => Some(AuthMethod::Email),
            "phone" => Some(AuthMethod::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a security alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// Network health as reported by the security monitor.
///
/// `Compromised` exists in the model but no code path produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    #[default]
    Secure,
    Warning,
    Compromised,
}

impl NetworkStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkStatus::Secure => "secure",
            NetworkStatus::Warning => "warning",
            NetworkStatus::Compromised => "compromised",
        }
    }
}

/// Connection state of the realtime feed.
///
/// ```text
/// [CONNECTING] ──2s──→ [CONNECTED]
///       ↑                   │
///       └──── reconnect ────┘
/// ```
///
/// `Disconnected` is never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

/// Category of a realtime notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Vote,
    Verification,
    System,
    Security,
}

impl NotificationCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Vote => "vote",
            NotificationCategory::Verification => "verification",
            NotificationCategory::System => "system",
            NotificationCategory::Security => "security",
        }
    }
}

/// Display priority of a realtime notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

impl NotificationPriority {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Medium => "medium",
            NotificationPriority::High => "high",
        }
    }
}
