//! # Domain Layer - Security Monitor Subsystem
//!
//! - `entities`: `SecurityState`, `SecurityAlert`, bounds and caps
//! - `config`: `SecurityMonitorConfig`

pub mod config;
pub mod entities;

pub use config::*;
pub use entities::*;
