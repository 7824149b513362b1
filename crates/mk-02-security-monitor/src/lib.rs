//! # Security Monitor Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Holds the device security state shown during voting: the secure mode
//! switch, a jittering device compliance figure, the network status and a
//! short list of alerts.
//!
//! ## State Rules
//!
//! | Rule | Enforcement Location |
//! |------|---------------------|
//! | Lockdown always mirrors secure mode | `domain/entities.rs` - `set_secure_mode()` |
//! | At most 10 alerts, newest first | `domain/entities.rs` - `push_alert()` |
//! | Tick keeps compliance in `[95, 100]` | `domain/entities.rs` - `apply_check()` |
//! | Refresh never exceeds 100 | `domain/entities.rs` - `apply_refresh()` |
//! | Unknown alert ids are ignored | `domain/entities.rs` - `resolve_alert()` |
//!
//! ## Operations
//!
//! | Operation | Effect | Event |
//! |-----------|--------|-------|
//! | `enable_secure_mode()` | both flags on, info alert prepended | `SecureModeChanged`, `SecurityAlertRaised` |
//! | `disable_secure_mode()` | both flags off | `SecureModeChanged` |
//! | `tick()` | compliance ±1, warning with p = 0.05 | `SecurityChecked` |
//! | `refresh()` | compliance + U[0, 2) | `SecurityChecked` |
//! | `add_alert()` | alert prepended | `SecurityAlertRaised` |
//! | `resolve_alert()` | alert marked resolved | `SecurityAlertResolved` |
//!
//! `NetworkStatus::Compromised` is part of the model but never produced.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::*;
