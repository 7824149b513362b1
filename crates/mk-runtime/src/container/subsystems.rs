//! # Subsystem Container
//!
//! Builds every subsystem around one set of shared ports:
//!
//! ```text
//! TimeSource ─┬─→ QrIssuer, QrScanner          (1)
//! Delay ──────┼─→ SecurityMonitor              (2)
//! Random ─────┼─→ RealtimeFeed                 (3)
//! EventBus ───┘
//! ```
//!
//! Each store is owned by one `Arc` and mutated only through its own
//! operations.

use std::sync::Arc;

use tracing::info;

use mk_01_qr_codec::{AuthVerification, QrIssuer, QrScanner};
use mk_02_security_monitor::SecurityMonitor;
use mk_03_realtime_feed::RealtimeFeed;
use shared_bus::InMemoryEventBus;
use shared_types::{
    Delay, InstantDelay, RandomSource, SeededRandom, SystemTimeSource, ThreadRandom, TimeSource,
    TokioDelay,
};

use crate::container::config::RuntimeConfig;

/// Central container holding all subsystem instances.
pub struct DemoContainer {
    // =========================================================================
    // SUBSYSTEMS
    // =========================================================================
    /// QR record issuing (Subsystem 1)
    pub issuer: Arc<QrIssuer>,

    /// Simulated QR scanning (Subsystem 1)
    pub scanner: Arc<QrScanner>,

    /// Security state store (Subsystem 2)
    pub security: Arc<SecurityMonitor>,

    /// Realtime notification store (Subsystem 3)
    pub feed: Arc<RealtimeFeed>,

    // =========================================================================
    // SHARED INFRASTRUCTURE
    // =========================================================================
    /// Event bus carrying store events to handlers.
    pub event_bus: Arc<InMemoryEventBus>,

    pub time: Arc<dyn TimeSource>,
    pub delay: Arc<dyn Delay>,
    pub rng: Arc<dyn RandomSource>,

    /// Runtime configuration (immutable after initialization).
    pub config: RuntimeConfig,
}

impl DemoContainer {
    /// Create a container with the system clock, tokio delays (or instant
    /// ones when `fast`) and the thread RNG (or a seeded one).
    pub fn new(config: RuntimeConfig) -> Self {
        let time: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);
        let delay: Arc<dyn Delay> = if config.fast {
            Arc::new(InstantDelay)
        } else {
            Arc::new(TokioDelay)
        };
        let rng: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        Self::with_ports(config, time, delay, rng)
    }

    /// Create a container around explicit ports.
    pub fn with_ports(
        config: RuntimeConfig,
        time: Arc<dyn TimeSource>,
        delay: Arc<dyn Delay>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        info!("Initializing Matrakshak subsystem container");

        let event_bus = Arc::new(InMemoryEventBus::new());

        let issuer = Arc::new(QrIssuer::new(
            Arc::clone(&time),
            Arc::clone(&delay),
            Arc::clone(&rng),
            event_bus.clone(),
            &config.qr,
        ));
        let scanner = Arc::new(QrScanner::new(
            Arc::clone(&time),
            Arc::clone(&delay),
            event_bus.clone(),
            &config.qr,
        ));
        info!("  [1] QR codec initialized");

        let security = Arc::new(SecurityMonitor::new(
            Arc::clone(&time),
            Arc::clone(&rng),
            event_bus.clone(),
            config.security.clone(),
        ));
        info!(
            tick_secs = config.security.tick_interval.as_secs(),
            "  [2] Security monitor initialized"
        );

        let feed = Arc::new(RealtimeFeed::new(
            Arc::clone(&time),
            Arc::clone(&rng),
            Arc::clone(&delay),
            event_bus.clone(),
            config.feed.clone(),
        ));
        info!(
            vote_tick_secs = config.feed.vote_tick_interval.as_secs(),
            notification_tick_secs = config.feed.notification_tick_interval.as_secs(),
            "  [3] Realtime feed initialized"
        );

        Self {
            issuer,
            scanner,
            security,
            feed,
            event_bus,
            time,
            delay,
            rng,
            config,
        }
    }

    /// Fresh authentication flow sharing this container's issuer and scanner.
    pub fn auth_verification(&self) -> AuthVerification {
        AuthVerification::new(
            Arc::clone(&self.issuer),
            Arc::clone(&self.scanner),
            Arc::clone(&self.time),
            Arc::clone(&self.delay),
            self.config.qr.clone(),
        )
    }
}
