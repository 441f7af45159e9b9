//! State identifiers and state records.
//!
//! States are plain data: an opaque identifier, a human-readable
//! description, and the initial/final flags. They carry no behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an automaton state, e.g. `q0`.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::StateId;
///
/// let id = StateId::from("q0");
/// assert_eq!(id.as_str(), "q0");
/// assert_eq!(id.to_string(), "q0");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A state of the automaton together with its catalog metadata.
///
/// Exactly one state of a table is initial; one or more are final.
/// These constraints are checked when the table is built, not here.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::StateInfo;
///
/// let done = StateInfo::new("q17", "Transaction Complete").final_state();
/// assert!(done.is_final());
/// assert!(!done.is_initial());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct StateInfo {
    pub id: StateId,
    pub description: String,
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub is_final: bool,
}

impl StateInfo {
    /// Create a non-initial, non-final state.
    pub fn new(id: impl Into<StateId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            is_initial: false,
            is_final: false,
        }
    }

    /// Mark this state as the initial state.
    pub fn initial(mut self) -> Self {
        self.is_initial = true;
        self
    }

    /// Mark this state as a final (accepting) state.
    pub fn final_state(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn id(&self) -> &StateId {
        &self.id
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Final states are the points where a transaction is complete.
    pub fn is_final(&self) -> bool {
        self.is_final
    }
}
