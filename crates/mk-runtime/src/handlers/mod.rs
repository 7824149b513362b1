//! # Event Handlers
//!
//! Bus subscribers started by the runtime. Handlers only observe: they
//! never call back into a store.
//!
//! | Handler | Subscribes To | Effect |
//! |---------|---------------|--------|
//! | `MetricsHandler` | all topics | updates Prometheus collectors |
//! | `EventLogHandler` | all topics | one JSON log line per event |

pub mod event_log;
pub mod metrics;

pub use event_log::EventLogHandler;
pub use metrics::MetricsHandler;
