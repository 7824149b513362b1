//! # QR Record Codec Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Builds and validates the logical records a QR code would carry in the
//! voting demo. No image is rendered or decoded: scanning is simulated from
//! a text descriptor.
//!
//! ## Record Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | `create` is deterministic in `(kind, payload, now)` | `domain/signature.rs` |
//! | Fresh records validate for 300 000 ms inclusive | `domain/codec.rs` - `check()` |
//! | Changing kind, payload or timestamp invalidates | `domain/signature.rs` - canonical JSON |
//! | Future timestamps are never expired | `domain/entities.rs` - `age_ms()` |
//!
//! The pseudo-signature is an unkeyed digest prefix. Anyone can recompute
//! it, so it detects accidental edits only.
//!
//! ## Scan Outcomes
//!
//! | Condition (checked in order) | Error |
//! |------------------------------|-------|
//! | Descriptor names no kind | `ScanError::MalformedScan` |
//! | Kind differs from the expected one | `ScanError::TypeMismatch` |
//! | Expired or signature mismatch | `ScanError::ExpiredOrInvalid` |
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/ - QrIssuer, QrScanner, AuthVerification               │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs - QrCodecApi, QrScanApi traits                │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ - QrRecord, QrCodec, pseudo-signature, ids, errors     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::*;
