//! Batch validation of complete input words.
//!
//! The validator walks a word through the table from a starting state and
//! records every attempted move. Processing is fail-fast: the first illegal
//! symbol ends the walk, and nothing after it appears in the trace.
//!
//! Illegal moves are part of the result, never an `Err`. A caller can always
//! tell a rejected word apart from a misconfigured automaton.

use crate::core::{StateId, Symbol};
use crate::table::TransitionTable;
use serde::{Deserialize, Serialize};

/// One attempted move during batch processing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub step: usize,
    pub current_state: StateId,
    pub symbol: Symbol,
    /// `None` when the symbol has no transition from `current_state`.
    pub next_state: Option<StateId>,
    pub is_valid: bool,
}

/// Why a word was rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rejection {
    /// The symbol at `position` has no transition from `state`.
    IllegalTransition {
        position: usize,
        state: StateId,
        symbol: Symbol,
    },

    /// Every symbol was consumed but the walk ended outside a final state.
    NotFinal { state: StateId },
}

/// Verdict and trace of a batch run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub input: Vec<Symbol>,
    pub accepted: bool,
    /// State the walk stopped in.
    pub final_state: StateId,
    /// Visited states, starting with the initial state.
    pub path: Vec<StateId>,
    pub trace: Vec<TraceEntry>,
}

impl ProcessResult {
    /// The consumed input joined back into a string.
    pub fn input_string(&self) -> String {
        Symbol::join(&self.input)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        if self.accepted {
            return None;
        }

        match self.trace.last() {
            Some(entry) if !entry.is_valid => Some(Rejection::IllegalTransition {
                position: entry.step,
                state: entry.current_state.clone(),
                symbol: entry.symbol.clone(),
            }),
            _ => Some(Rejection::NotFinal {
                state: self.final_state.clone(),
            }),
        }
    }
}

/// Runs whole words through a shared transition table.
///
/// # Example
///
/// ```rust
/// use vending_fsa::table::TableBuilder;
/// use vending_fsa::validator::BatchValidator;
///
/// let table = TableBuilder::new()
///     .initial_state("q0", "Start")
///     .final_state("q1", "Done")
///     .symbol('a', "Advance")
///     .transition("q0", 'a', "q1")
///     .build()
///     .unwrap();
///
/// let validator = BatchValidator::new(&table);
/// assert!(validator.accepts("a"));
/// assert!(!validator.accepts("b"));
/// assert!(!validator.accepts(""));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BatchValidator<'t> {
    table: &'t TransitionTable,
}

impl<'t> BatchValidator<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    /// Process `input` starting from `initial`.
    ///
    /// The word is accepted iff every symbol has a transition and the walk
    /// ends in a final state. Reaching a final state midway does not stop
    /// processing; only an illegal symbol does.
    pub fn process(&self, initial: &StateId, input: &[Symbol]) -> ProcessResult {
        let mut current = initial.clone();
        let mut path = vec![initial.clone()];
        let mut trace = Vec::with_capacity(input.len());
        let mut consumed_all = true;

        for (step, symbol) in input.iter().enumerate() {
            let next = self.table.lookup(&current, symbol).map(|t| t.to.clone());
            let is_valid = next.is_some();

            tracing::debug!(
                step,
                state = %current,
                symbol = %symbol,
                next = ?next.as_ref().map(StateId::as_str),
                "batch step"
            );

            trace.push(TraceEntry {
                step,
                current_state: current.clone(),
                symbol: symbol.clone(),
                next_state: next.clone(),
                is_valid,
            });

            match next {
                Some(next) => {
                    path.push(next.clone());
                    current = next;
                }
                None => {
                    consumed_all = false;
                    break;
                }
            }
        }

        let accepted = consumed_all && self.table.is_final(&current);
        tracing::info!(
            input = %Symbol::join(input),
            accepted,
            final_state = %current,
            steps = trace.len(),
            "processed input"
        );

        ProcessResult {
            input: input.to_vec(),
            accepted,
            final_state: current,
            path,
            trace,
        }
    }

    /// Process a string of one-character symbols from the table's initial state.
    ///
    /// Whitespace is skipped. A character outside the alphabet is an illegal
    /// symbol like any other.
    pub fn process_str(&self, input: &str) -> ProcessResult {
        self.process(self.table.initial_state(), &Symbol::parse_word(input))
    }

    pub fn accepts(&self, input: &str) -> bool {
        self.process_str(input).accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    fn single_step() -> TransitionTable {
        TableBuilder::new()
            .initial_state("q0", "Start")
            .final_state("q1", "Done")
            .symbol('a', "Advance")
            .symbol('b', "Other")
            .transition("q0", 'a', "q1")
            .build()
            .unwrap()
    }

    fn looping() -> TransitionTable {
        TableBuilder::new()
            .initial_state("q0", "Start")
            .final_state("q1", "Done")
            .symbol('a', "Advance")
            .symbol('b', "Back")
            .transition("q0", 'a', "q1")
            .transition("q1", 'b', "q0")
            .build()
            .unwrap()
    }

    #[test]
    fn accepted_word_has_full_valid_trace() {
        let table = single_step();
        let result = BatchValidator::new(&table).process(&"q0".into(), &[Symbol::from('a')]);

        assert!(result.accepted);
        assert_eq!(
            result.trace,
            vec![TraceEntry {
                step: 0,
                current_state: "q0".into(),
                symbol: 'a'.into(),
                next_state: Some("q1".into()),
                is_valid: true,
            }]
        );
        assert_eq!(result.path, vec![StateId::from("q0"), StateId::from("q1")]);
        assert_eq!(result.rejection(), None);
    }

    #[test]
    fn illegal_symbol_is_recorded_and_stops_processing() {
        let table = single_step();
        let result = BatchValidator::new(&table).process_str("ba");

        assert!(!result.accepted);
        assert_eq!(
            result.trace,
            vec![TraceEntry {
                step: 0,
                current_state: "q0".into(),
                symbol: 'b'.into(),
                next_state: None,
                is_valid: false,
            }]
        );
        assert_eq!(result.final_state, StateId::from("q0"));
        assert_eq!(
            result.rejection(),
            Some(Rejection::IllegalTransition {
                position: 0,
                state: "q0".into(),
                symbol: 'b'.into(),
            })
        );
    }

    #[test]
    fn empty_input_accepted_only_from_final_initial() {
        let table = single_step();
        let validator = BatchValidator::new(&table);

        let from_start = validator.process(&"q0".into(), &[]);
        assert!(!from_start.accepted);
        assert!(from_start.trace.is_empty());
        assert_eq!(
            from_start.rejection(),
            Some(Rejection::NotFinal { state: "q0".into() })
        );

        let from_final = validator.process(&"q1".into(), &[]);
        assert!(from_final.accepted);
        assert!(from_final.trace.is_empty());
    }

    #[test]
    fn passing_through_final_does_not_short_circuit() {
        let table = looping();
        let validator = BatchValidator::new(&table);

        let result = validator.process_str("ab");
        assert!(!result.accepted);
        assert_eq!(result.trace.len(), 2);
        assert!(result.trace.iter().all(|e| e.is_valid));
        assert_eq!(result.final_state, StateId::from("q0"));

        assert!(validator.accepts("aba"));
    }

    #[test]
    fn unknown_character_is_an_illegal_symbol() {
        let table = looping();
        let result = BatchValidator::new(&table).process_str("a?a");

        assert_eq!(result.trace.len(), 2);
        let last = result.trace.last().unwrap();
        assert_eq!(last.symbol, Symbol::from('?'));
        assert!(!last.is_valid);
        assert_eq!(last.next_state, None);
    }

    #[test]
    fn whitespace_is_ignored_in_strings() {
        let table = looping();
        let result = BatchValidator::new(&table).process_str(" a b a ");
        assert!(result.accepted);
        assert_eq!(result.input_string(), "aba");
    }

    #[test]
    fn unknown_initial_state_rejects_everything() {
        let table = single_step();
        let result = BatchValidator::new(&table).process(&"q9".into(), &[Symbol::from('a')]);
        assert!(!result.accepted);
        assert_eq!(result.trace.len(), 1);
        assert!(!result.trace[0].is_valid);
    }
}
