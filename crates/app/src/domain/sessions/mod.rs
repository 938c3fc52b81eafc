//! Sessions
//!
//! Idle expiry for signed-in dealers: a clock that warns before forced
//! sign-out and renews on activity.

pub mod clock;
pub mod errors;
pub mod service;
pub mod timer;

pub use clock::{ActivityOutcome, SessionClock, SessionEvent, SessionPolicy, SessionState};
pub use errors::SessionsServiceError;
pub use service::*;
pub use timer::{SessionNotice, SessionTimer};
