//! Structural checks run when a table is built.
//!
//! Checks use Stillwater's `Validation` so that a malformed table reports
//! every problem in one pass instead of stopping at the first.

use crate::core::{StateId, StateInfo, Symbol, SymbolInfo, Transition};
use crate::table::error::{ConfigurationError, TableViolation};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<TableViolation>>;

fn violation(v: TableViolation) -> Check {
    Validation::fail(v)
}

fn unique_states(states: &[StateInfo]) -> Vec<Check> {
    let mut seen = HashSet::new();
    states
        .iter()
        .filter(|s| !seen.insert(&s.id))
        .map(|s| violation(TableViolation::DuplicateState(s.id.clone())))
        .collect()
}

fn unique_symbols(alphabet: &[SymbolInfo]) -> Vec<Check> {
    let mut seen = HashSet::new();
    alphabet
        .iter()
        .filter(|s| !seen.insert(&s.symbol))
        .map(|s| violation(TableViolation::DuplicateSymbol(s.symbol.clone())))
        .collect()
}

fn single_initial(states: &[StateInfo]) -> Check {
    let initial: Vec<StateId> = states
        .iter()
        .filter(|s| s.is_initial)
        .map(|s| s.id.clone())
        .collect();

    match initial.len() {
        0 => violation(TableViolation::MissingInitialState),
        1 => Validation::success(()),
        _ => violation(TableViolation::MultipleInitialStates(initial)),
    }
}

fn has_final(states: &[StateInfo]) -> Check {
    if states.iter().any(|s| s.is_final) {
        Validation::success(())
    } else {
        violation(TableViolation::NoFinalStates)
    }
}

fn transition_checks(
    states: &[StateInfo],
    alphabet: &[SymbolInfo],
    transitions: &[Transition],
) -> Vec<Check> {
    let known_states: HashSet<&StateId> = states.iter().map(|s| &s.id).collect();
    let known_symbols: HashSet<&Symbol> = alphabet.iter().map(|s| &s.symbol).collect();
    let mut keys = HashSet::new();
    let mut checks = Vec::new();

    for transition in transitions {
        for state in [&transition.from, &transition.to] {
            if !known_states.contains(state) {
                checks.push(violation(TableViolation::UnknownState {
                    transition: transition.to_string(),
                    state: state.clone(),
                }));
            }
        }

        if !known_symbols.contains(&transition.symbol) {
            checks.push(violation(TableViolation::UnknownSymbol {
                transition: transition.to_string(),
                symbol: transition.symbol.clone(),
            }));
        }

        if !keys.insert(transition.key()) {
            checks.push(violation(TableViolation::DuplicateTransition {
                from: transition.from.clone(),
                symbol: transition.symbol.clone(),
            }));
        }
    }

    checks
}

/// Run every structural check, accumulating all violations.
pub(crate) fn validate(
    states: &[StateInfo],
    alphabet: &[SymbolInfo],
    transitions: &[Transition],
) -> Result<(), ConfigurationError> {
    let mut checks = vec![single_initial(states), has_final(states)];
    checks.extend(unique_states(states));
    checks.extend(unique_symbols(alphabet));
    checks.extend(transition_checks(states, alphabet, transitions));

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(ConfigurationError::Invalid {
            violations: errors.iter().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<StateInfo> {
        vec![
            StateInfo::new("q0", "Start").initial(),
            StateInfo::new("q1", "Done").final_state(),
        ]
    }

    fn alphabet() -> Vec<SymbolInfo> {
        vec![SymbolInfo::new('a', "Advance")]
    }

    #[test]
    fn well_formed_table_passes() {
        let transitions = vec![Transition::new("q0", 'a', "q1", "Advance")];
        assert!(validate(&states(), &alphabet(), &transitions).is_ok());
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let transitions = vec![
            Transition::new("q0", 'a', "q1", "Advance"),
            Transition::new("q0", 'a', "q0", "Stay"),
        ];

        let error = validate(&states(), &alphabet(), &transitions).unwrap_err();
        assert_eq!(
            error.violations(),
            &[TableViolation::DuplicateTransition {
                from: "q0".into(),
                symbol: 'a'.into(),
            }]
        );
    }

    #[test]
    fn all_violations_are_accumulated() {
        let states = vec![
            StateInfo::new("q0", "Start"),
            StateInfo::new("q0", "Again"),
        ];
        let transitions = vec![Transition::new("q0", 'z', "q9", "Nowhere")];

        let error = validate(&states, &alphabet(), &transitions).unwrap_err();
        let violations = error.violations();

        assert!(violations.contains(&TableViolation::MissingInitialState));
        assert!(violations.contains(&TableViolation::NoFinalStates));
        assert!(violations.contains(&TableViolation::DuplicateState("q0".into())));
        assert!(violations
            .iter()
            .any(|v| matches!(v, TableViolation::UnknownState { state, .. } if state.as_str() == "q9")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, TableViolation::UnknownSymbol { .. })));
    }

    #[test]
    fn two_initial_states_are_rejected() {
        let states = vec![
            StateInfo::new("q0", "Start").initial(),
            StateInfo::new("q1", "Other start").initial().final_state(),
        ];

        let error = validate(&states, &alphabet(), &[]).unwrap_err();
        assert!(matches!(
            error.violations(),
            [TableViolation::MultipleInitialStates(ids)] if ids.len() == 2
        ));
    }

    #[test]
    fn duplicate_symbol_is_rejected() {
        let alphabet = vec![SymbolInfo::new('a', "One"), SymbolInfo::new('a', "Two")];
        let error = validate(&states(), &alphabet, &[]).unwrap_err();
        assert_eq!(
            error.violations(),
            &[TableViolation::DuplicateSymbol('a'.into())]
        );
    }
}
