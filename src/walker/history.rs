//! Step history of an interactive session.
//!
//! History is immutable: `record` returns a new history with the step
//! added. A session swaps in the new history only after every other part
//! of the step has succeeded.

use crate::core::{StateId, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one accepted step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub from: StateId,
    pub symbol: Symbol,
    pub to: StateId,
    /// Balance after the step's ledger rule was applied.
    pub balance: u64,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of a session's accepted steps.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::StateId;
/// use vending_fsa::walker::{SessionHistory, StepRecord};
/// use chrono::Utc;
///
/// let history = SessionHistory::new("q0".into());
/// let history = history.record(StepRecord {
///     from: "q0".into(),
///     symbol: 'a'.into(),
///     to: "q1".into(),
///     balance: 0,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.path();
/// assert_eq!(path, vec![&StateId::from("q0"), &StateId::from("q1")]);
/// assert_eq!(history.symbol_string(), "a");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionHistory {
    initial: StateId,
    steps: Vec<StepRecord>,
}

impl SessionHistory {
    /// Create an empty history rooted at `initial`.
    pub fn new(initial: StateId) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    /// Record a step, returning a new history.
    pub fn record(&self, step: StepRecord) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self {
            initial: self.initial.clone(),
            steps,
        }
    }

    /// States visited so far, starting with the initial state.
    pub fn path(&self) -> Vec<&StateId> {
        std::iter::once(&self.initial)
            .chain(self.steps.iter().map(|s| &s.to))
            .collect()
    }

    /// Symbols consumed so far, in order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        self.steps.iter().map(|s| &s.symbol).collect()
    }

    pub fn symbol_string(&self) -> String {
        self.steps.iter().map(|s| s.symbol.as_str()).collect()
    }

    /// Time between the first and the last step.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
