//! # Demo Container
//!
//! Holds the store and QR service instances with their shared ports, and
//! hands them to consumers explicitly. There are no global singletons.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, RuntimeConfig, SessionConfig};
pub use subsystems::DemoContainer;
