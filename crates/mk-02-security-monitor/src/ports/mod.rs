//! Ports for the security monitor.

pub mod inbound;

pub use inbound::*;
