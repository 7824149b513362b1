//! # Realtime Feed Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Simulates the live data shown on the voting and admin screens: vote
//! counters that drift upward, a notification feed and a connection that
//! always comes up after a short delay.
//!
//! ## Ticks
//!
//! | Tick | Default Period | Effect |
//! |------|----------------|--------|
//! | `tick_votes()` | 5 s | total += 0..=2, active = 10..=39, turnout += U[0, 0.1) capped at 100 |
//! | `tick_notifications()` | 15 s | with p = 0.3 push one of 3 catalog templates |
//!
//! The two ticks run as separate tasks. No ordering holds between them.
//!
//! ## Connection
//!
//! ```text
//! connect()/reconnect() ──→ [CONNECTING] ──connect_delay──→ [CONNECTED]
//! ```
//!
//! There is no failure path. `ConnectionStatus::Disconnected` is never
//! entered.
//!
//! ## Feed Rules
//!
//! - At most 20 notifications, newest first (`domain/entities.rs`)
//! - `mark_read` with an unknown id changes nothing
//! - `clear` on an empty feed removes nothing

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::*;
