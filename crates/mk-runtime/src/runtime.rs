//! # Demo Runtime
//!
//! Owns the container and every background task.
//!
//! ## Startup Sequence
//!
//! 1. Subscribe the bus handlers (before any store publishes)
//! 2. Spawn the handlers, each racing the shutdown signal
//! 3. Start the periodic tickers (security 10s, votes 5s, notifications 15s)
//! 4. Open the feed connection in the background
//!
//! ## Shutdown Sequence
//!
//! 1. Signal shutdown to all handlers
//! 2. Stop every ticker
//! 3. Await the handler tasks and any connect still in its delay

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use mk_03_realtime_feed::RealtimeFeedApi;
use shared_bus::{EventFilter, EventTopic};
use shared_types::PeriodicTask;

use crate::container::{DemoContainer, RuntimeConfig};
use crate::flows::{SessionError, SessionReport, VoterSession};
use crate::handlers::{EventLogHandler, MetricsHandler};

/// The demo runtime orchestrating all subsystems.
pub struct DemoRuntime {
    container: Arc<DemoContainer>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    tickers: Mutex<Vec<PeriodicTask>>,
    handlers: Mutex<Vec<JoinHandle<()>>>,
}

impl DemoRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_container(DemoContainer::new(config))
    }

    pub fn with_container(container: DemoContainer) -> Self {
        info!("Creating Matrakshak demo runtime");
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            container: Arc::new(container),
            shutdown_tx,
            shutdown_rx,
            tickers: Mutex::new(Vec::new()),
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Start handlers, tickers and the feed connection.
    pub fn start(&self) {
        info!("===========================================");
        info!("  Matrakshak Demo Runtime v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        self.start_handlers();

        let mut tickers = self.tickers.lock();
        tickers.push(self.container.security.spawn_ticker());
        tickers.push(self.container.feed.spawn_vote_ticker());
        tickers.push(self.container.feed.spawn_notification_ticker());
        drop(tickers);

        // The connect delay is one-shot and not cancellable; shutdown waits for it.
        let feed = Arc::clone(&self.container.feed);
        self.handlers.lock().push(tokio::spawn(async move {
            feed.connect().await;
        }));

        info!("All subsystems running");
    }

    fn start_handlers(&self) {
        let bus = &self.container.event_bus;
        let metrics = MetricsHandler::new(bus.subscribe(EventFilter::all()));
        let event_log = EventLogHandler::new(bus.subscribe(EventFilter::all()));

        let mut metrics_shutdown = self.shutdown_rx.clone();
        let metrics_task = tokio::spawn(async move {
            tokio::select! {
                _ = metrics.run() => {}
                _ = metrics_shutdown.changed() => {
                    info!("[metrics] Shutdown signal received");
                }
            }
        });

        let mut log_shutdown = self.shutdown_rx.clone();
        let log_task = tokio::spawn(async move {
            tokio::select! {
                _ = event_log.run() => {}
                _ = log_shutdown.changed() => {
                    info!("[event-log] Shutdown signal received");
                }
            }
        });

        self.handlers.lock().extend([metrics_task, log_task]);
        info!(subscribers = bus.subscriber_count(), "Event handlers started");
    }

    /// Run the scripted voter session to completion.
    pub async fn run_voter_session(&self) -> Result<SessionReport, SessionError> {
        VoterSession::new(&self.container).run().await
    }

    /// Stop every background task.
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        let tickers: Vec<PeriodicTask> = self.tickers.lock().drain(..).collect();
        for ticker in tickers {
            ticker.stop().await;
        }

        let handlers: Vec<JoinHandle<()>> = self.handlers.lock().drain(..).collect();
        for handle in handlers {
            if let Err(e) = handle.await {
                error!("Background task failed: {}", e);
            }
        }

        let bus = &self.container.event_bus;
        info!(
            qr = bus.published(EventTopic::Qr),
            security = bus.published(EventTopic::Security),
            realtime = bus.published(EventTopic::Realtime),
            "Events published"
        );
        info!("Shutdown complete");
    }

    pub fn container(&self) -> Arc<DemoContainer> {
        Arc::clone(&self.container)
    }
}
