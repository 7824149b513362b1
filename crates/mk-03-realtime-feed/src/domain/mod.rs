//! # Domain Layer - Realtime Feed Subsystem
//!
//! - `entities`: `RealtimeState`, `Notification`, templates and catalog
//! - `config`: `FeedConfig`

pub mod config;
pub mod entities;

pub use config::*;
pub use entities::*;
