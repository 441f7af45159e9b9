//! The boba vending machine.
//!
//! A complete automaton for one purchase: start, pick a product, pick a
//! payment method, pay in cash or non-cash, settle change, finish. The
//! product costs 15000.

use crate::ledger::{BalanceRule, LedgerRules};
use crate::table::{ConfigurationError, TableBuilder, TransitionTable};

/// Price of the single product sold by the machine.
pub const PRODUCT_PRICE: u64 = 15000;

/// Accepted sample transactions with a short description of each.
pub const SAMPLE_TRANSACTIONS: &[(&str, &str)] = &[
    ("abdgjlrtu", "Non-cash payment, sufficient balance"),
    ("abcehkmstu", "Cash payment (5000) settled by QR scan, exact amount"),
    ("abcfikmstu", "Cash payment (10000), change returned"),
    ("abdgjkpgjlrtu", "Non-cash payment retried after insufficient balance"),
    ("abcehkmoqehkmstu", "Cash 5000 retried after insufficient balance"),
    ("abcfikmoqfikmstu", "Cash 10000 retried after insufficient balance"),
];

const STATES: &[(&str, &str)] = &[
    ("q0", "Initial State"),
    ("q1", "Select Product"),
    ("q2", "Select Payment Method"),
    ("q3", "Non-Cash Payment"),
    ("q4", "Cash Payment"),
    ("q5", "Calculate Balance (Non-Cash)"),
    ("q6", "Input Cash 5000"),
    ("q7", "Input Cash 10000"),
    ("q8", "Check Balance (Non-Cash)"),
    ("q9", "Calculate Balance (Cash)"),
    ("q10", "Check Balance (Cash)"),
    ("q11", "Return Money (Non-Cash)"),
    ("q12", "Dispense Product (Non-Cash)"),
    ("q13", "Dispense Product (Cash)"),
    ("q14", "Return Money (Cash)"),
    ("q15", "Calculate Change"),
    ("q16", "Dispense Change"),
    ("q17", "Transaction Complete"),
];

const ALPHABET: &[(char, &str)] = &[
    ('a', "Start"),
    ('b', "Select Product"),
    ('c', "Select Payment Method"),
    ('d', "Non-Cash"),
    ('e', "Cash Input 5000"),
    ('f', "Cash Input 10000"),
    ('g', "Calculate Balance"),
    ('h', "Scan QR"),
    ('i', "Add Cash 10000"),
    ('j', "Balance Check"),
    ('k', "Insufficient Balance"),
    ('l', "Sufficient Balance"),
    ('m', "Return to Selection"),
    ('n', "Dispense Product"),
    ('o', "Insufficient Balance (Cash)"),
    ('p', "Return Money"),
    ('q', "Dispense Product (Cash)"),
    ('r', "Calculate Change"),
    ('s', "No Change"),
    ('t', "Change Available"),
    ('u', "Dispense Change"),
    ('1', "Add Cash 5000"),
    ('2', "Add Cash 10000"),
];

const TRANSITIONS: &[(&str, char, &str)] = &[
    ("q0", 'a', "q1"),
    ("q1", 'b', "q2"),
    ("q2", 'c', "q4"),
    ("q2", 'd', "q3"),
    ("q3", 'd', "q3"),
    ("q3", 'g', "q5"),
    ("q4", 'e', "q6"),
    ("q4", 'f', "q7"),
    ("q5", 'j', "q8"),
    ("q6", '1', "q6"),
    ("q6", 'h', "q9"),
    ("q7", '2', "q7"),
    ("q7", 'i', "q9"),
    ("q8", 'k', "q11"),
    ("q8", 'l', "q12"),
    ("q9", 'k', "q10"),
    ("q10", 'm', "q13"),
    ("q10", 'o', "q14"),
    ("q11", 'p', "q3"),
    ("q12", 'n', "q11"),
    ("q12", 'r', "q15"),
    ("q13", 's', "q15"),
    ("q13", 'r', "q15"),
    ("q13", 'o', "q14"),
    ("q13", 'q', "q14"),
    ("q14", 's', "q4"),
    ("q14", 'q', "q4"),
    ("q15", 't', "q16"),
    ("q16", 'u', "q17"),
];

/// Build the vending machine's transition table.
///
/// # Example
///
/// ```rust
/// use vending_fsa::catalog;
/// use vending_fsa::validator::BatchValidator;
///
/// let table = catalog::vending_machine().unwrap();
/// let validator = BatchValidator::new(&table);
/// for (input, _description) in catalog::SAMPLE_TRANSACTIONS {
///     assert!(validator.accepts(input));
/// }
/// ```
pub fn vending_machine() -> Result<TransitionTable, ConfigurationError> {
    let last = STATES.len() - 1;
    let builder = STATES
        .iter()
        .enumerate()
        .fold(TableBuilder::new(), |builder, (i, &(id, description))| {
            match i {
                0 => builder.initial_state(id, description),
                i if i == last => builder.final_state(id, description),
                _ => builder.state(id, description),
            }
        });

    let builder = ALPHABET
        .iter()
        .fold(builder, |builder, &(symbol, description)| {
            builder.symbol(symbol, description)
        });

    TRANSITIONS
        .iter()
        .fold(builder, |builder, &(from, symbol, to)| {
            builder.transition(from, symbol, to)
        })
        .build()
}

/// Balance rules of the vending machine.
///
/// Coins add their face value; scanning a QR code pays the exact price.
pub fn vending_ledger() -> LedgerRules {
    LedgerRules::new(PRODUCT_PRICE)
        .with_rule('e', BalanceRule::Add(5000))
        .with_rule('f', BalanceRule::Add(10000))
        .with_rule('h', BalanceRule::SetToPrice)
        .with_rule('i', BalanceRule::Add(10000))
        .with_rule('1', BalanceRule::Add(5000))
        .with_rule('2', BalanceRule::Add(10000))
}
