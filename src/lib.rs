//! Vending FSA: a deterministic finite-state automaton for vending transactions.
//!
//! A single immutable [`TransitionTable`](table::TransitionTable) is the
//! source of truth for which moves are legal. Two independent consumers
//! read from it:
//!
//! - **Batch validation** runs a whole input word through the table and
//!   returns an accept/reject verdict with a full trace.
//! - **Interactive sessions** advance one symbol at a time while a
//!   [`LedgerRules`](ledger::LedgerRules) set keeps a running balance.
//!
//! # Core Concepts
//!
//! - **Catalog**: states, symbols and transitions as plain data
//! - **Table**: validated `(state, symbol) -> transition` lookup
//! - **Ledger**: per-symbol balance rules, kept apart from legality
//! - **Validator**: fail-fast batch processing
//! - **Walker**: `Active`/`Completed`/`Aborted` sessions
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vending_fsa::catalog;
//! use vending_fsa::validator::BatchValidator;
//! use vending_fsa::walker::{Session, SessionStatus};
//!
//! let table = Arc::new(catalog::vending_machine().unwrap());
//! let ledger = Arc::new(catalog::vending_ledger());
//!
//! let result = BatchValidator::new(&table).process_str("abcfikmstu");
//! assert!(result.accepted);
//!
//! let mut session = Session::new(table, ledger);
//! for symbol in "abcfikmstu".chars() {
//!     session.step(symbol).unwrap();
//! }
//! assert_eq!(session.status(), SessionStatus::Completed);
//! assert_eq!(session.change_due(), Some(5000));
//! ```

pub mod catalog;
pub mod core;
pub mod ledger;
pub mod snapshot;
pub mod table;
pub mod validator;
pub mod walker;

// Re-export commonly used types
pub use crate::core::{StateId, StateInfo, Symbol, SymbolInfo, Transition};
pub use ledger::{BalanceRule, LedgerRules};
pub use table::{ConfigurationError, TableBuilder, TransitionTable};
pub use validator::{BatchValidator, ProcessResult, TraceEntry};
pub use walker::{Session, SessionStatus, WalkerError};
