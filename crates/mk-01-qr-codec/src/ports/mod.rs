//! Ports for the QR codec subsystem.

pub mod inbound;

pub use inbound::*;
