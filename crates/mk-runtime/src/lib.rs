//! # Matrakshak Demo Runtime Library
//!
//! This library exposes the internal modules of the demo runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and the subsystem container
//! - `handlers/` - Bus subscribers (metrics, event-flow log)
//! - `flows/` - Scripted voter session across all subsystems
//! - `runtime` - Startup and shutdown of every background task

#![allow(clippy::too_many_lines)]

pub mod container;
pub mod flows;
pub mod handlers;
pub mod runtime;

pub use container::{ConfigError, DemoContainer, RuntimeConfig, SessionConfig};
pub use flows::{SessionError, SessionReport, VoterSession};
pub use runtime::DemoRuntime;
