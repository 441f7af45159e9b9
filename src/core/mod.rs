//! Alphabet and state catalog.
//!
//! This module contains the plain data the automaton is made of:
//! - State identifiers and state records
//! - Input symbols and their descriptions
//! - Transition records
//!
//! Nothing here has behavior beyond construction and inspection.

mod state;
mod symbol;
mod transition;

pub use state::{StateId, StateInfo};
pub use symbol::{Symbol, SymbolInfo};
pub use transition::Transition;
