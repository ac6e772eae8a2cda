//! Session: the interactive pipeline state machine
//!
//! The front end feeds [`SessionEvent`]s to a [`Session`] and renders the
//! [`Outcome`] it gets back. [`next_action`] is the pure transition
//! function; the session runs whatever pipeline steps the action needs.

mod cache;
mod errors;
mod phase;
mod session_state;

// Re-export public API
pub use cache::{CachedReport, SessionCache};
pub use errors::SessionError;
pub use phase::{next_action, Action, Phase, SessionEvent};
pub use session_state::{CorrectionNotice, Outcome, Session};
