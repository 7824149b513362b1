//! # Domain Layer - QR Codec Subsystem
//!
//! Pure logic: no delays, no clocks, no I/O.
//!
//! ## Components
//!
//! - `entities`: `QrRecord`, typed `AuthPayload`/`VotePayload`, payload keys
//! - `signature`: unkeyed pseudo-signature derivation
//! - `codec`: `QrCodec` (create / check / validate)
//! - `ids`: vote and session identifiers, placeholder code URLs
//! - `config`: simulated timings
//! - `errors`: `QrError`, `ScanError`

pub mod codec;
pub mod config;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod signature;

pub use codec::*;
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use ids::*;
pub use signature::*;
