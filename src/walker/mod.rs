//! Interactive walker: drive the automaton one symbol at a time.
//!
//! A [`Session`] is an explicit state machine of its own:
//!
//! - `Active` accepts `step` and `abort`
//! - `Completed` is entered when the current state is final
//! - `Aborted` is entered when the caller cancels
//!
//! A presentation layer drives a session with a plain loop over
//! `available_moves`, `step`, and `abort`; the business rules live here.

mod error;
mod history;
mod session;

pub use error::WalkerError;
pub use history::{SessionHistory, StepRecord};
pub use session::{Move, Receipt, Session, SessionStatus, StepOutcome};
