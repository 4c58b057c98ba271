//! Game orchestration
//!
//! [`GameSession`] drives a single playthrough; [`ConcealScheduler`] lets
//! synchronous and timer-driven front ends share it.

pub mod conceal;
mod session;

pub use conceal::{ConcealScheduler, Deferred, Immediate};
pub use session::{GameSession, SelectError, SelectOutcome, SessionState, StartError};
