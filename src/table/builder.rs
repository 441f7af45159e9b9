//! Fluent builder for transition tables.

use crate::core::{StateId, StateInfo, Symbol, SymbolInfo, Transition};
use crate::table::config::FsaConfig;
use crate::table::error::ConfigurationError;
use crate::table::TransitionTable;

/// Builder for constructing transition tables with a fluent API.
///
/// Nothing is checked until [`build`](TableBuilder::build), which reports
/// every structural problem at once.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::{StateId, Symbol};
/// use vending_fsa::table::TableBuilder;
///
/// let table = TableBuilder::new()
///     .initial_state("q0", "Idle")
///     .final_state("q1", "Paid")
///     .symbol('a', "Insert coin")
///     .transition("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// let next = table.lookup(&StateId::from("q0"), &Symbol::from('a')).unwrap();
/// assert_eq!(next.to, StateId::from("q1"));
/// assert_eq!(next.description, "Insert coin");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    states: Vec<StateInfo>,
    alphabet: Vec<SymbolInfo>,
    transitions: Vec<Transition>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a state record as-is.
    pub fn add_state(mut self, state: StateInfo) -> Self {
        self.states.push(state);
        self
    }

    /// Add an intermediate state.
    pub fn state(self, id: impl Into<StateId>, description: impl Into<String>) -> Self {
        self.add_state(StateInfo::new(id, description))
    }

    /// Add the initial state.
    pub fn initial_state(self, id: impl Into<StateId>, description: impl Into<String>) -> Self {
        self.add_state(StateInfo::new(id, description).initial())
    }

    /// Add a final (accepting) state.
    pub fn final_state(self, id: impl Into<StateId>, description: impl Into<String>) -> Self {
        self.add_state(StateInfo::new(id, description).final_state())
    }

    /// Add a symbol to the alphabet.
    pub fn symbol(mut self, symbol: impl Into<Symbol>, description: impl Into<String>) -> Self {
        self.alphabet.push(SymbolInfo::new(symbol, description));
        self
    }

    /// Add a transition described by its symbol's description.
    pub fn transition(
        self,
        from: impl Into<StateId>,
        symbol: impl Into<Symbol>,
        to: impl Into<StateId>,
    ) -> Self {
        self.transition_described(from, symbol, to, String::new())
    }

    /// Add a transition with its own description.
    pub fn transition_described(
        mut self,
        from: impl Into<StateId>,
        symbol: impl Into<Symbol>,
        to: impl Into<StateId>,
        description: impl Into<String>,
    ) -> Self {
        self.transitions
            .push(Transition::new(from, symbol, to, description));
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<TransitionTable, ConfigurationError> {
        TransitionTable::from_config(self.into_config())
    }

    pub fn into_config(self) -> FsaConfig {
        FsaConfig {
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableViolation;

    #[test]
    fn builder_requires_initial_state() {
        let result = TableBuilder::new().final_state("q1", "Done").build();

        let error = result.unwrap_err();
        assert_eq!(error.violations(), &[TableViolation::MissingInitialState]);
    }

    #[test]
    fn builder_requires_final_state() {
        let result = TableBuilder::new().initial_state("q0", "Start").build();

        let error = result.unwrap_err();
        assert_eq!(error.violations(), &[TableViolation::NoFinalStates]);
    }

    #[test]
    fn explicit_description_wins_over_symbol_description() {
        let table = TableBuilder::new()
            .initial_state("q0", "Start")
            .final_state("q1", "Done")
            .symbol('a', "Advance")
            .transition_described("q0", 'a', "q1", "Finish the purchase")
            .build()
            .unwrap();

        let transition = table
            .lookup(&"q0".into(), &'a'.into())
            .unwrap();
        assert_eq!(transition.description, "Finish the purchase");
    }

    #[test]
    fn into_config_keeps_definition_order() {
        let config = TableBuilder::new()
            .initial_state("q0", "Start")
            .state("q1", "Middle")
            .final_state("q2", "End")
            .into_config();

        let ids: Vec<&str> = config.states.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["q0", "q1", "q2"]);
    }
}
