//! Realtime feed service.

pub mod feed;

pub use feed::RealtimeFeed;
