//! # Runtime Configuration
//!
//! Unified configuration for the stores, the QR flows and the demo session.
//! Every value has a default; environment variables override them.
//!
//! | Variable | Default | Effect |
//! |----------|---------|--------|
//! | `MK_SECURITY_TICK_SECS` | `10` | Security check period |
//! | `MK_VOTE_TICK_SECS` | `5` | Vote counter period |
//! | `MK_NOTIFICATION_TICK_SECS` | `15` | Notification period |
//! | `MK_RUN_FOR_SECS` | unset | Stop after this long instead of waiting for Ctrl+C |
//! | `MK_VOTER_ID` | `VT-2024-001` | Voter used by the demo session |
//! | `MK_AUTH_METHOD` | `voter-id` | `voter-id`, `email` or `phone` |
//! | `MK_CANDIDATE_ID` | `candidate-1` | Candidate voted for |
//! | `MK_ELECTION_ID` | `election-2024` | Election voted in |
//! | `MK_SEED` | unset | Seed the random source for reproducible runs |
//! | `MK_FAST` | `false` | Skip all simulated delays |

use mk_01_qr_codec::QrTimingConfig;
use mk_02_security_monitor::SecurityMonitorConfig;
use mk_03_realtime_feed::FeedConfig;
use mk_telemetry::parse_flag;
use shared_types::AuthMethod;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    /// A tick period was set to zero.
    #[error("{var} must be at least 1 second")]
    ZeroInterval { var: &'static str },

    /// Unknown login method tag.
    #[error("MK_AUTH_METHOD must be voter-id, email or phone, got {0:?}")]
    UnknownAuthMethod(String),
}

/// Inputs of the scripted voter session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub voter_id: String,
    pub auth_method: AuthMethod,
    pub candidate_id: String,
    pub election_id: String,
    /// Simulated login round trip.
    pub login_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            voter_id: "VT-2024-001".to_string(),
            auth_method: AuthMethod::VoterId,
            candidate_id: "candidate-1".to_string(),
            election_id: "election-2024".to_string(),
            login_delay: Duration::from_millis(1500),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeConfig {
    /// Security monitor configuration.
    pub security: SecurityMonitorConfig,
    /// Realtime feed configuration.
    pub feed: FeedConfig,
    /// QR generation, scan and verification timings.
    pub qr: QrTimingConfig,
    /// Demo voter session.
    pub session: SessionConfig,
    /// Stop after this long. `None` waits for Ctrl+C.
    pub run_for: Option<Duration>,
    /// Seed for the random source. `None` uses the thread RNG.
    pub seed: Option<u64>,
    /// Replace every simulated delay with an immediate yield.
    pub fast: bool,
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(secs) = interval(&lookup, "MK_SECURITY_TICK_SECS")? {
            config.security.tick_interval = secs;
        }
        if let Some(secs) = interval(&lookup, "MK_VOTE_TICK_SECS")? {
            config.feed.vote_tick_interval = secs;
        }
        if let Some(secs) = interval(&lookup, "MK_NOTIFICATION_TICK_SECS")? {
            config.feed.notification_tick_interval = secs;
        }
        config.run_for = number(&lookup, "MK_RUN_FOR_SECS")?.map(Duration::from_secs);
        config.seed = number(&lookup, "MK_SEED")?;

        if let Some(voter_id) = lookup("MK_VOTER_ID") {
            config.session.voter_id = voter_id;
        }
        if let Some(tag) = lookup("MK_AUTH_METHOD") {
            config.session.auth_method =
                AuthMethod::parse(&tag).ok_or(ConfigError::UnknownAuthMethod(tag))?;
        }
        if let Some(candidate_id) = lookup("MK_CANDIDATE_ID") {
            config.session.candidate_id = candidate_id;
        }
        if let Some(election_id) = lookup("MK_ELECTION_ID") {
            config.session.election_id = election_id;
        }

        if lookup("MK_FAST").is_some_and(|v| parse_flag(&v)) {
            config.fast = true;
        }
        Ok(config)
    }
}

fn number(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
    }
}

fn interval(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    match number(lookup, var)? {
        Some(0) => Err(ConfigError::ZeroInterval { var }),
        other => Ok(other.map(Duration::from_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RuntimeConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.security.tick_interval, Duration::from_secs(10));
        assert_eq!(config.feed.vote_tick_interval, Duration::from_secs(5));
        assert_eq!(config.feed.notification_tick_interval, Duration::from_secs(15));
        assert_eq!(config.run_for, None);
        assert!(!config.fast);
        assert_eq!(config.session.auth_method, AuthMethod::VoterId);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MK_SECURITY_TICK_SECS", "2"),
            ("MK_VOTE_TICK_SECS", " 1 "),
            ("MK_RUN_FOR_SECS", "30"),
            ("MK_VOTER_ID", "VT-9"),
            ("MK_AUTH_METHOD", "email"),
            ("MK_SEED", "42"),
            ("MK_FAST", "yes"),
        ])
        .unwrap();

        assert_eq!(config.security.tick_interval, Duration::from_secs(2));
        assert_eq!(config.feed.vote_tick_interval, Duration::from_secs(1));
        assert_eq!(config.run_for, Some(Duration::from_secs(30)));
        assert_eq!(config.session.voter_id, "VT-9");
        assert_eq!(config.session.auth_method, AuthMethod::Email);
        assert_eq!(config.seed, Some(42));
        assert!(config.fast);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("MK_VOTE_TICK_SECS", "soon")]),
            Err(ConfigError::InvalidNumber {
                var: "MK_VOTE_TICK_SECS",
                value: "soon".into(),
            })
        );
        assert_eq!(
            load(&[("MK_SECURITY_TICK_SECS", "0")]),
            Err(ConfigError::ZeroInterval {
                var: "MK_SECURITY_TICK_SECS"
            })
        );
        assert_eq!(
            load(&[("MK_AUTH_METHOD", "retina")]),
            Err(ConfigError::UnknownAuthMethod("retina".into()))
        );
    }
}
