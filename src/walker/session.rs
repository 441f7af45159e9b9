//! Interactive, step-at-a-time sessions.

use crate::core::{StateId, StateInfo, Symbol, Transition};
use crate::ledger::{BalanceRule, LedgerRules};
use crate::snapshot::SessionSnapshot;
use crate::table::TransitionTable;
use crate::walker::error::WalkerError;
use crate::walker::history::{SessionHistory, StepRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The current state is not final; steps are accepted.
    Active,
    /// The current state is final.
    Completed,
    /// The caller cancelled the session.
    Aborted,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// A legal move from the current state, as offered to the driving caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub symbol: Symbol,
    pub description: String,
    pub next_state: StateId,
    /// Effect on the balance if this move is taken.
    pub balance_rule: Option<BalanceRule>,
}

/// What a successful `step` did.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub transition: Transition,
    pub balance_before: u64,
    pub balance_after: u64,
    pub status: SessionStatus,
}

/// Summary of a completed transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub symbols: String,
    pub path: Vec<StateId>,
    pub balance: u64,
    pub price: u64,
    pub change_due: Option<u64>,
}

/// One in-progress walk through the automaton.
///
/// A session shares the table and ledger read-only and owns everything
/// else: current state, balance, and history. It is driven by exactly one
/// caller; `step` and `abort` take `&mut self`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vending_fsa::ledger::{BalanceRule, LedgerRules};
/// use vending_fsa::table::TableBuilder;
/// use vending_fsa::walker::{Session, SessionStatus};
///
/// let table = TableBuilder::new()
///     .initial_state("q0", "Waiting for coins")
///     .final_state("q1", "Paid")
///     .symbol('e', "Insert 5000")
///     .symbol('h', "Scan QR")
///     .transition("q0", 'e', "q0")
///     .transition("q0", 'h', "q1")
///     .build()
///     .unwrap();
/// let ledger = LedgerRules::new(15000)
///     .with_rule('e', BalanceRule::Add(5000))
///     .with_rule('h', BalanceRule::SetToPrice);
///
/// let mut session = Session::new(Arc::new(table), Arc::new(ledger));
/// session.step('e').unwrap();
/// assert_eq!(session.balance(), 5000);
///
/// session.step('h').unwrap();
/// assert_eq!(session.balance(), 15000);
/// assert_eq!(session.status(), SessionStatus::Completed);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    table: Arc<TransitionTable>,
    ledger: Arc<LedgerRules>,
    current: StateId,
    balance: u64,
    history: SessionHistory,
    status: SessionStatus,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session in the table's initial state with a zero balance.
    ///
    /// If the initial state is itself final the session starts `Completed`.
    pub fn new(table: Arc<TransitionTable>, ledger: Arc<LedgerRules>) -> Self {
        let current = table.initial_state().clone();
        let status = if table.is_final(&current) {
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        };
        let id = Uuid::new_v4();

        tracing::debug!(session = %id, initial = %current, "session started");

        Self {
            id,
            history: SessionHistory::new(current.clone()),
            table,
            ledger,
            current,
            balance: 0,
            status,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn current_state(&self) -> &StateId {
        &self.current
    }

    pub fn current_state_info(&self) -> Option<&StateInfo> {
        self.table.state(&self.current)
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn price(&self) -> u64 {
        self.ledger.price()
    }

    /// Visited states, starting with the initial state.
    pub fn path(&self) -> Vec<&StateId> {
        self.history.path()
    }

    /// Consumed symbols in order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        self.history.symbols()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Advance by one symbol.
    ///
    /// Fails with [`WalkerError::SessionClosed`] once the session is
    /// completed or aborted, and with [`WalkerError::InvalidMove`] when the
    /// symbol has no transition from the current state. The session is not
    /// modified when an error is returned.
    pub fn step(&mut self, symbol: impl Into<Symbol>) -> Result<StepOutcome, WalkerError> {
        let symbol = symbol.into();
        self.ensure_active()?;

        let Some(transition) = self.table.lookup(&self.current, &symbol).cloned() else {
            tracing::warn!(
                session = %self.id,
                state = %self.current,
                symbol = %symbol,
                "rejected move"
            );
            return Err(WalkerError::InvalidMove {
                state: self.current.clone(),
                symbol,
            });
        };

        let balance_before = self.balance;
        let balance_after = self.ledger.apply(balance_before, &symbol);

        self.history = self.history.record(StepRecord {
            from: self.current.clone(),
            symbol,
            to: transition.to.clone(),
            balance: balance_after,
            timestamp: Utc::now(),
        });
        self.balance = balance_after;
        self.current = transition.to.clone();

        tracing::debug!(
            session = %self.id,
            transition = %transition,
            balance_before,
            balance_after,
            "step applied"
        );

        if self.table.is_final(&self.current) {
            self.status = SessionStatus::Completed;
            tracing::info!(
                session = %self.id,
                symbols = %self.history.symbol_string(),
                balance = self.balance,
                change_due = ?self.change_due(),
                "session completed"
            );
        } else if self.is_dead_end() {
            tracing::warn!(session = %self.id, state = %self.current, "session reached a dead end");
        }

        Ok(StepOutcome {
            transition,
            balance_before,
            balance_after,
            status: self.status,
        })
    }

    /// Legal moves from the current state, in table definition order.
    ///
    /// Closed sessions offer no moves. An empty list on an active session
    /// is a dead end: see [`is_dead_end`](Session::is_dead_end).
    pub fn available_moves(&self) -> Vec<Move> {
        if !self.is_active() {
            return Vec::new();
        }

        self.table
            .transitions_from(&self.current)
            .into_iter()
            .map(|t| Move {
                symbol: t.symbol.clone(),
                description: t.description.clone(),
                next_state: t.to.clone(),
                balance_rule: self.ledger.rule_for(&t.symbol),
            })
            .collect()
    }

    /// Active but with no legal continuation. The caller cannot complete
    /// the transaction and must abort it.
    pub fn is_dead_end(&self) -> bool {
        self.is_active() && self.table.transitions_from(&self.current).is_empty()
    }

    /// Cancel an active session. No further steps are accepted.
    pub fn abort(&mut self) -> Result<(), WalkerError> {
        self.ensure_active()?;
        self.status = SessionStatus::Aborted;
        tracing::info!(
            session = %self.id,
            state = %self.current,
            balance = self.balance,
            "session aborted"
        );
        Ok(())
    }

    /// Excess over the price, reported once the session is completed.
    pub fn change_due(&self) -> Option<u64> {
        if self.status != SessionStatus::Completed {
            return None;
        }
        self.ledger.change_due(self.balance)
    }

    /// Amount still missing before the balance covers the price.
    pub fn shortfall(&self) -> Option<u64> {
        self.ledger.shortfall(self.balance)
    }

    pub fn receipt(&self) -> Option<Receipt> {
        if self.status != SessionStatus::Completed {
            return None;
        }
        Some(Receipt {
            symbols: self.history.symbol_string(),
            path: self.path().into_iter().cloned().collect(),
            balance: self.balance,
            price: self.price(),
            change_due: self.change_due(),
        })
    }

    /// Read-only view for a presentation layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    fn ensure_active(&self) -> Result<(), WalkerError> {
        match self.status {
            SessionStatus::Active => Ok(()),
            status => Err(WalkerError::SessionClosed { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    fn coin_table() -> Arc<TransitionTable> {
        Arc::new(
            TableBuilder::new()
                .initial_state("q0", "Waiting")
                .state("q1", "Choosing")
                .state("q2", "Stuck")
                .final_state("q3", "Paid")
                .symbol('e', "Insert 5000")
                .symbol('f', "Insert 10000")
                .symbol('h', "Scan QR")
                .symbol('x', "Jam")
                .symbol('d', "Done")
                .transition("q0", 'e', "q0")
                .transition("q0", 'f', "q0")
                .transition("q0", 'h', "q1")
                .transition("q0", 'x', "q2")
                .transition("q0", 'd', "q3")
                .transition("q1", 'd', "q3")
                .build()
                .unwrap(),
        )
    }

    fn coin_ledger() -> Arc<LedgerRules> {
        Arc::new(
            LedgerRules::new(15000)
                .with_rule('e', BalanceRule::Add(5000))
                .with_rule('f', BalanceRule::Add(10000))
                .with_rule('h', BalanceRule::SetToPrice),
        )
    }

    fn session() -> Session {
        Session::new(coin_table(), coin_ledger())
    }

    #[test]
    fn new_session_starts_at_initial_state() {
        let session = session();
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.current_state(), &StateId::from("q0"));
        assert_eq!(session.balance(), 0);
        assert_eq!(session.path(), vec![&StateId::from("q0")]);
        assert!(session.symbols().is_empty());
    }

    #[test]
    fn three_coins_reach_the_price() {
        let mut session = session();
        for _ in 0..3 {
            session.step('e').unwrap();
        }
        assert_eq!(session.balance(), 15000);
        assert_eq!(session.history().len(), 3);
    }

    #[test]
    fn exact_payment_overwrites_accumulated_balance() {
        let mut session = session();
        session.step('e').unwrap();

        let outcome = session.step('h').unwrap();
        assert_eq!(outcome.balance_before, 5000);
        assert_eq!(outcome.balance_after, 15000);
        assert_eq!(session.balance(), 15000);
    }

    #[test]
    fn invalid_move_leaves_session_untouched() {
        let mut session = session();
        session.step('h').unwrap();
        let before = (
            session.current_state().clone(),
            session.balance(),
            session.history().clone(),
        );

        let error = session.step('e').unwrap_err();
        assert_eq!(
            error,
            WalkerError::InvalidMove {
                state: "q1".into(),
                symbol: 'e'.into(),
            }
        );
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(
            (
                session.current_state().clone(),
                session.balance(),
                session.history().clone()
            ),
            before
        );
    }

    #[test]
    fn reaching_final_state_completes_session() {
        let mut session = session();
        session.step('f').unwrap();
        session.step('f').unwrap();
        let outcome = session.step('d').unwrap();

        assert_eq!(outcome.status, SessionStatus::Completed);
        assert_eq!(session.change_due(), Some(5000));

        let receipt = session.receipt().unwrap();
        assert_eq!(receipt.symbols, "ffd");
        assert_eq!(receipt.balance, 20000);
        assert_eq!(receipt.change_due, Some(5000));
        assert_eq!(receipt.path.len(), 4);
    }

    #[test]
    fn step_after_completion_is_rejected() {
        let mut session = session();
        session.step('d').unwrap();

        let error = session.step('e').unwrap_err();
        assert_eq!(
            error,
            WalkerError::SessionClosed {
                status: SessionStatus::Completed
            }
        );
        assert_eq!(session.balance(), 0);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn step_after_abort_is_rejected() {
        let mut session = session();
        session.step('e').unwrap();
        session.abort().unwrap();

        assert_eq!(session.status(), SessionStatus::Aborted);
        assert!(matches!(
            session.step('e'),
            Err(WalkerError::SessionClosed {
                status: SessionStatus::Aborted
            })
        ));
        assert!(session.abort().is_err());
        assert_eq!(session.balance(), 5000);
        assert!(session.change_due().is_none());
        assert!(session.receipt().is_none());
    }

    #[test]
    fn available_moves_follow_definition_order() {
        let session = session();
        let moves = session.available_moves();
        let symbols: Vec<&str> = moves.iter().map(|m| m.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["e", "f", "h", "x", "d"]);
        assert_eq!(moves[0].balance_rule, Some(BalanceRule::Add(5000)));
        assert_eq!(moves[2].balance_rule, Some(BalanceRule::SetToPrice));
        assert_eq!(moves[4].balance_rule, None);
        assert_eq!(moves[4].description, "Done");
    }

    #[test]
    fn dead_end_is_distinct_from_completion() {
        let mut stuck = session();
        stuck.step('x').unwrap();
        assert!(stuck.available_moves().is_empty());
        assert!(stuck.is_dead_end());
        assert_eq!(stuck.status(), SessionStatus::Active);

        let mut done = session();
        done.step('d').unwrap();
        assert!(done.available_moves().is_empty());
        assert!(!done.is_dead_end());
    }

    #[test]
    fn shortfall_tracks_missing_amount() {
        let mut session = session();
        assert_eq!(session.shortfall(), Some(15000));
        session.step('f').unwrap();
        assert_eq!(session.shortfall(), Some(5000));
        session.step('e').unwrap();
        assert_eq!(session.shortfall(), None);
    }

    #[test]
    fn session_with_final_initial_state_starts_completed() {
        let table = TableBuilder::new()
            .add_state(StateInfo::new("q0", "Nothing to do").initial().final_state())
            .build()
            .unwrap();
        let session = Session::new(Arc::new(table), coin_ledger());
        assert_eq!(session.status(), SessionStatus::Completed);
    }

    #[test]
    fn sessions_sharing_a_table_are_independent() {
        let table = coin_table();
        let ledger = coin_ledger();
        let mut first = Session::new(Arc::clone(&table), Arc::clone(&ledger));
        let second = Session::new(table, ledger);

        first.step('e').unwrap();
        assert_eq!(first.balance(), 5000);
        assert_eq!(second.balance(), 0);
        assert_ne!(first.id(), second.id());
    }
}
