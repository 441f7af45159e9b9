//! The transition table: single source of truth for legal moves.
//!
//! A [`TransitionTable`] is built once, validated, and never mutated. Both
//! the batch validator and interactive sessions read from the same table,
//! so they always agree on which moves are legal.

mod builder;
mod config;
mod error;
mod validation;

pub use builder::TableBuilder;
pub use config::FsaConfig;
pub use error::{ConfigurationError, TableViolation};

use crate::core::{StateId, StateInfo, Symbol, SymbolInfo, Transition};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Summary of an automaton's configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FsaInfo {
    pub initial_state: StateId,
    pub final_states: Vec<StateId>,
    pub total_states: usize,
    pub alphabet_size: usize,
    pub alphabet: Vec<Symbol>,
}

/// A state record together with its outgoing transitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDetails {
    pub state: StateInfo,
    pub transitions: Vec<Transition>,
}

/// Immutable deterministic transition table.
///
/// Transitions are keyed by `(from, symbol)`; at most one exists per key.
/// A missing key means the move is illegal from that state.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::{StateId, Symbol};
/// use vending_fsa::table::TableBuilder;
///
/// let table = TableBuilder::new()
///     .initial_state("q0", "Start")
///     .final_state("q1", "Done")
///     .symbol('a', "Advance")
///     .transition("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// assert!(table.lookup(&StateId::from("q0"), &Symbol::from('a')).is_some());
/// assert!(table.lookup(&StateId::from("q0"), &Symbol::from('b')).is_none());
/// assert!(table.validate_transition(&"q0".into(), &'a'.into(), &"q1".into()));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionTable {
    states: Vec<StateInfo>,
    state_index: HashMap<StateId, usize>,
    alphabet: Vec<SymbolInfo>,
    symbol_index: HashMap<Symbol, usize>,
    transitions: Vec<Transition>,
    by_key: HashMap<StateId, HashMap<Symbol, usize>>,
    outgoing: HashMap<StateId, Vec<usize>>,
    initial: StateId,
}

impl TransitionTable {
    /// Validate a configuration and build the table from it.
    ///
    /// Transitions with an empty description inherit the description of
    /// their symbol.
    pub fn from_config(config: FsaConfig) -> Result<Self, ConfigurationError> {
        let FsaConfig {
            states,
            alphabet,
            mut transitions,
        } = config;

        if let Err(error) = validation::validate(&states, &alphabet, &transitions) {
            tracing::warn!(
                violations = error.violations().len(),
                "rejected transition table: {error}"
            );
            return Err(error);
        }

        let state_index: HashMap<StateId, usize> = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        let symbol_index: HashMap<Symbol, usize> = alphabet
            .iter()
            .enumerate()
            .map(|(i, s)| (s.symbol.clone(), i))
            .collect();

        let mut by_key: HashMap<StateId, HashMap<Symbol, usize>> = HashMap::new();
        let mut outgoing: HashMap<StateId, Vec<usize>> = HashMap::new();
        for (i, transition) in transitions.iter_mut().enumerate() {
            if transition.description.is_empty() {
                if let Some(&idx) = symbol_index.get(&transition.symbol) {
                    transition.description = alphabet[idx].description.clone();
                }
            }
            by_key
                .entry(transition.from.clone())
                .or_default()
                .insert(transition.symbol.clone(), i);
            outgoing.entry(transition.from.clone()).or_default().push(i);
        }

        // Validation guarantees exactly one initial state.
        let initial = states
            .iter()
            .find(|s| s.is_initial)
            .map(|s| s.id.clone())
            .ok_or(ConfigurationError::Invalid {
                violations: vec![TableViolation::MissingInitialState],
            })?;

        tracing::debug!(
            states = states.len(),
            symbols = alphabet.len(),
            transitions = transitions.len(),
            initial = %initial,
            "built transition table"
        );

        Ok(Self {
            states,
            state_index,
            alphabet,
            symbol_index,
            transitions,
            by_key,
            outgoing,
            initial,
        })
    }

    /// Parse a JSON configuration and build the table from it.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Self::from_config(FsaConfig::from_json(json)?)
    }

    /// Export the table back into its declarative form.
    pub fn to_config(&self) -> FsaConfig {
        FsaConfig {
            states: self.states.clone(),
            alphabet: self.alphabet.clone(),
            transitions: self.transitions.clone(),
        }
    }

    /// The transition for `(state, symbol)`, if the move is legal.
    pub fn lookup(&self, state: &StateId, symbol: &Symbol) -> Option<&Transition> {
        self.by_key
            .get(state)?
            .get(symbol)
            .map(|&i| &self.transitions[i])
    }

    /// Outgoing transitions of `state` in definition order.
    pub fn transitions_from(&self, state: &StateId) -> Vec<&Transition> {
        self.outgoing
            .get(state)
            .map(|indices| indices.iter().map(|&i| &self.transitions[i]).collect())
            .unwrap_or_default()
    }

    /// Check whether `from --symbol--> to` is exactly the table's move.
    pub fn validate_transition(&self, from: &StateId, symbol: &Symbol, to: &StateId) -> bool {
        self.lookup(from, symbol).is_some_and(|t| &t.to == to)
    }

    pub fn initial_state(&self) -> &StateId {
        &self.initial
    }

    pub fn final_states(&self) -> Vec<&StateId> {
        self.states
            .iter()
            .filter(|s| s.is_final)
            .map(|s| &s.id)
            .collect()
    }

    /// Whether `state` is final. Unknown states are never final.
    pub fn is_final(&self, state: &StateId) -> bool {
        self.state(state).is_some_and(StateInfo::is_final)
    }

    pub fn state(&self, id: &StateId) -> Option<&StateInfo> {
        self.state_index.get(id).map(|&i| &self.states[i])
    }

    pub fn symbol(&self, symbol: &Symbol) -> Option<&SymbolInfo> {
        self.symbol_index.get(symbol).map(|&i| &self.alphabet[i])
    }

    /// All states in definition order.
    pub fn states(&self) -> &[StateInfo] {
        &self.states
    }

    /// The alphabet in definition order.
    pub fn alphabet(&self) -> &[SymbolInfo] {
        &self.alphabet
    }

    /// All transitions in definition order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn info(&self) -> FsaInfo {
        FsaInfo {
            initial_state: self.initial.clone(),
            final_states: self.final_states().into_iter().cloned().collect(),
            total_states: self.states.len(),
            alphabet_size: self.alphabet.len(),
            alphabet: self.alphabet.iter().map(|s| s.symbol.clone()).collect(),
        }
    }

    pub fn state_details(&self, id: &StateId) -> Option<StateDetails> {
        let state = self.state(id)?.clone();
        Some(StateDetails {
            state,
            transitions: self.transitions_from(id).into_iter().cloned().collect(),
        })
    }

    /// Reachable states from which no final state can be reached.
    ///
    /// A well-authored table returns an empty list. This is not enforced at
    /// construction; a walk that enters one of these states can never
    /// complete.
    pub fn trapped_states(&self) -> Vec<&StateId> {
        let reachable = self.reachable_from_initial();

        let mut incoming: HashMap<&StateId, Vec<&StateId>> = HashMap::new();
        for t in &self.transitions {
            incoming.entry(&t.to).or_default().push(&t.from);
        }

        let mut can_finish: HashSet<&StateId> = self.final_states().into_iter().collect();
        let mut queue: VecDeque<&StateId> = can_finish.iter().copied().collect();
        while let Some(state) = queue.pop_front() {
            for &prev in incoming.get(state).into_iter().flatten() {
                if can_finish.insert(prev) {
                    queue.push_back(prev);
                }
            }
        }

        self.states
            .iter()
            .map(|s| &s.id)
            .filter(|id| reachable.contains(id) && !can_finish.contains(id))
            .collect()
    }

    fn reachable_from_initial(&self) -> HashSet<&StateId> {
        let mut seen: HashSet<&StateId> = HashSet::from([&self.initial]);
        let mut queue = VecDeque::from([&self.initial]);
        while let Some(state) = queue.pop_front() {
            for t in self.transitions_from(state) {
                if seen.insert(&t.to) {
                    queue.push_back(&t.to);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> TransitionTable {
        TableBuilder::new()
            .initial_state("q0", "Start")
            .state("q1", "Left")
            .state("q2", "Right")
            .final_state("q3", "End")
            .symbol('l', "Go left")
            .symbol('r', "Go right")
            .symbol('f', "Finish")
            .transition("q0", 'l', "q1")
            .transition("q0", 'r', "q2")
            .transition("q1", 'f', "q3")
            .transition("q2", 'f', "q3")
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_finds_defined_transition() {
        let table = diamond();
        let t = table.lookup(&"q0".into(), &'r'.into()).unwrap();
        assert_eq!(t.to, StateId::from("q2"));
        assert_eq!(t.description, "Go right");
    }

    #[test]
    fn lookup_of_missing_key_is_none() {
        let table = diamond();
        assert!(table.lookup(&"q3".into(), &'f'.into()).is_none());
        assert!(table.lookup(&"q9".into(), &'l'.into()).is_none());
        assert!(table.lookup(&"q0".into(), &'x'.into()).is_none());
    }

    #[test]
    fn transitions_from_keeps_definition_order() {
        let table = diamond();
        let symbols: Vec<String> = table
            .transitions_from(&"q0".into())
            .iter()
            .map(|t| t.symbol.to_string())
            .collect();
        assert_eq!(symbols, vec!["l", "r"]);
        assert!(table.transitions_from(&"q3".into()).is_empty());
    }

    #[test]
    fn validate_transition_checks_target() {
        let table = diamond();
        assert!(table.validate_transition(&"q0".into(), &'l'.into(), &"q1".into()));
        assert!(!table.validate_transition(&"q0".into(), &'l'.into(), &"q2".into()));
        assert!(!table.validate_transition(&"q1".into(), &'l'.into(), &"q1".into()));
    }

    #[test]
    fn info_summarizes_configuration() {
        let info = diamond().info();
        assert_eq!(info.initial_state, StateId::from("q0"));
        assert_eq!(info.final_states, vec![StateId::from("q3")]);
        assert_eq!(info.total_states, 4);
        assert_eq!(info.alphabet_size, 3);
    }

    #[test]
    fn state_details_include_outgoing_transitions() {
        let table = diamond();
        let details = table.state_details(&"q1".into()).unwrap();
        assert_eq!(details.state.description, "Left");
        assert_eq!(details.transitions.len(), 1);
        assert!(table.state_details(&"q42".into()).is_none());
    }

    #[test]
    fn trapped_states_are_reported() {
        let table = TableBuilder::new()
            .initial_state("q0", "Start")
            .state("q1", "Stuck")
            .state("q2", "Unreachable")
            .final_state("q3", "End")
            .symbol('a', "A")
            .symbol('b', "B")
            .transition("q0", 'a', "q1")
            .transition("q0", 'b', "q3")
            .transition("q1", 'a', "q1")
            .build()
            .unwrap();

        assert_eq!(table.trapped_states(), vec![&StateId::from("q1")]);
        assert!(diamond().trapped_states().is_empty());
    }

    #[test]
    fn table_roundtrips_through_config() {
        let table = diamond();
        let json = table.to_config().to_json().unwrap();
        let rebuilt = TransitionTable::from_json(&json).unwrap();
        assert_eq!(rebuilt.transitions(), table.transitions());
        assert_eq!(rebuilt.initial_state(), table.initial_state());
    }
}
