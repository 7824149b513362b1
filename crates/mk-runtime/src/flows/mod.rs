//! Scripted end-to-end flows driven by the runtime.

pub mod voter_session;

pub use voter_session::{SessionError, SessionReport, VoterSession};
