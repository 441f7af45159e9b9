//! Construction errors for transition tables.

use crate::core::{StateId, Symbol};
use thiserror::Error;

/// A single structural problem found while building a transition table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableViolation {
    #[error("duplicate transition for ({from}, '{symbol}')")]
    DuplicateTransition { from: StateId, symbol: Symbol },

    #[error("state '{0}' is declared more than once")]
    DuplicateState(StateId),

    #[error("symbol '{0}' is declared more than once")]
    DuplicateSymbol(Symbol),

    #[error("no initial state declared")]
    MissingInitialState,

    #[error("more than one initial state declared: {}", join_states(.0))]
    MultipleInitialStates(Vec<StateId>),

    #[error("no final states declared")]
    NoFinalStates,

    #[error("transition {transition} references unknown state '{state}'")]
    UnknownState { transition: String, state: StateId },

    #[error("transition {transition} uses symbol '{symbol}' outside the alphabet")]
    UnknownSymbol { transition: String, symbol: Symbol },
}

/// Errors that can occur when building a transition table.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Every violation found is reported, not just the first.
    #[error("invalid transition table: {}", join_violations(.violations))]
    Invalid { violations: Vec<TableViolation> },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigurationError {
    /// Structural violations carried by this error; empty for parse failures.
    pub fn violations(&self) -> &[TableViolation] {
        match self {
            Self::Invalid { violations } => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn join_states(states: &[StateId]) -> String {
    states
        .iter()
        .map(StateId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_violations(violations: &[TableViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
