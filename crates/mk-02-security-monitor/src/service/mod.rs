//! Security monitor service.

pub mod monitor;

pub use monitor::SecurityMonitor;
