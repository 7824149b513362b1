//! Ports for the realtime feed.

pub mod inbound;

pub use inbound::*;
