//! # Shared Bus - Event Bus for Subsystem Notifications
//!
//! In-process broadcast bus that carries [`DemoEvent`]s from the stores to
//! whoever wants to observe them (log and metrics handlers, tests).
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Store (mk-0x)│                    │   Handler    │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! ## Rules
//!
//! - Events are published after the state change they describe.
//! - Events never carry commands: a store's state changes only through
//!   that store's own operations.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{subsystem_ids, DemoEvent, EventFilter, EventTopic, ScanOutcome};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before old events are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
