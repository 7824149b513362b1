//! # Shared Types Crate
//!
//! Domain enums and runtime ports shared by the Matrakshak subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Tags that cross crate boundaries (QR kinds,
//!   alert severities, notification categories, connection states) live here.
//! - **Injectable Effects**: Wall-clock time, artificial delays and random
//!   draws are traits, so stores can be driven deterministically in tests.
//! - **Owned Lifecycles**: Periodic work runs in a [`PeriodicTask`] that is
//!   cancelled when its handle is stopped or dropped.

pub mod delay;
pub mod entities;
pub mod ids;
pub mod random;
pub mod ticker;
pub mod time;

pub use delay::{Delay, InstantDelay, RecordingDelay, TokioDelay};
pub use entities::*;
pub use ids::{random_base36, short_id, to_base36};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use ticker::PeriodicTask;
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource, Timestamp};
