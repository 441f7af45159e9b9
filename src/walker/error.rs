//! Errors raised by interactive sessions.

use crate::core::{StateId, Symbol};
use crate::walker::SessionStatus;
use thiserror::Error;

/// Errors that can occur when driving a session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalkerError {
    /// Recoverable: the session is unchanged and another symbol may be tried.
    #[error("no transition from state '{state}' on symbol '{symbol}'")]
    InvalidMove { state: StateId, symbol: Symbol },

    #[error("session is {status} and accepts no further moves")]
    SessionClosed { status: SessionStatus },
}
