//! Application services: issue, scan and the authentication flow.

pub mod issuer;
pub mod scanner;
pub mod verification;

pub use issuer::{IssuedQr, QrIssuer};
pub use scanner::{canned, QrScanner};
pub use verification::{AuthVerification, VerificationError, VerificationStep};
