//! Transition records.

use super::state::StateId;
use super::symbol::Symbol;
use serde::{Deserialize, Serialize};

/// A single move of the automaton: `from --symbol--> to`.
///
/// Transitions are keyed by `(from, symbol)` inside a
/// [`TransitionTable`](crate::table::TransitionTable); the table guarantees
/// that at most one transition exists per key.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::{StateId, Symbol, Transition};
///
/// let start = Transition::new("q0", 'a', "q1", "Start");
/// assert_eq!(start.from, StateId::from("q0"));
/// assert_eq!(start.symbol, Symbol::from('a'));
/// assert_eq!(start.to_string(), "q0 --a--> q1");
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub symbol: Symbol,
    pub to: StateId,
    /// Left empty in configuration to inherit the symbol's description.
    #[serde(default)]
    pub description: String,
}

impl Transition {
    pub fn new(
        from: impl Into<StateId>,
        symbol: impl Into<Symbol>,
        to: impl Into<StateId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            symbol: symbol.into(),
            to: to.into(),
            description: description.into(),
        }
    }

    /// The `(from, symbol)` key this transition is stored under.
    pub fn key(&self) -> (&StateId, &Symbol) {
        (&self.from, &self.symbol)
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.symbol, self.to)
    }
}
