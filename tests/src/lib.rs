//! # Matrakshak Test Suite
//!
//! Unified test crate for behavior that spans more than one subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # Stores and scanner wired through the shared bus
//!     └── e2e_session.rs  # Record lifecycle and the full voter session
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mk-tests
//! cargo test -p mk-tests integration::e2e_session::
//! ```

pub mod integration;
