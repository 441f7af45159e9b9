//! Balance ledger rules.
//!
//! The ledger is a second lookup keyed by symbol, kept apart from the
//! transition table: the table decides whether a move is legal, the ledger
//! decides what it does to the running balance.

use crate::core::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Effect of a symbol on the running balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceRule {
    /// Add a signed amount. The balance never drops below zero.
    Add(i64),

    /// Overwrite the balance with the product price (exact payment).
    SetToPrice,
}

/// Product price plus the per-symbol balance rules.
///
/// # Example
///
/// ```rust
/// use vending_fsa::ledger::{BalanceRule, LedgerRules};
///
/// let ledger = LedgerRules::new(15000)
///     .with_rule('e', BalanceRule::Add(5000))
///     .with_rule('h', BalanceRule::SetToPrice);
///
/// let balance = ledger.apply(0, &'e'.into());
/// assert_eq!(balance, 5000);
/// assert_eq!(ledger.apply(balance, &'h'.into()), 15000);
/// assert_eq!(ledger.apply(balance, &'x'.into()), 5000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerRules {
    price: u64,
    rules: HashMap<Symbol, BalanceRule>,
}

/// Serializable form of [`LedgerRules`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub price: u64,
    #[serde(default)]
    pub rules: Vec<SymbolRule>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolRule {
    pub symbol: Symbol,
    pub rule: BalanceRule,
}

impl LedgerRules {
    /// Create a ledger with no rules for a product costing `price`.
    pub fn new(price: u64) -> Self {
        Self {
            price,
            rules: HashMap::new(),
        }
    }

    /// Attach a rule to a symbol, replacing any previous one.
    pub fn with_rule(mut self, symbol: impl Into<Symbol>, rule: BalanceRule) -> Self {
        self.rules.insert(symbol.into(), rule);
        self
    }

    pub fn from_config(config: LedgerConfig) -> Self {
        config
            .rules
            .into_iter()
            .fold(Self::new(config.price), |ledger, r| {
                ledger.with_rule(r.symbol, r.rule)
            })
    }

    /// Parse a JSON ledger configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_config(serde_json::from_str(json)?))
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn rule_for(&self, symbol: &Symbol) -> Option<BalanceRule> {
        self.rules.get(symbol).copied()
    }

    /// Balance after consuming `symbol`. Symbols without a rule leave it unchanged.
    pub fn apply(&self, balance: u64, symbol: &Symbol) -> u64 {
        match self.rule_for(symbol) {
            None => balance,
            Some(BalanceRule::SetToPrice) => self.price,
            Some(BalanceRule::Add(delta)) if delta >= 0 => {
                balance.saturating_add(delta.unsigned_abs())
            }
            Some(BalanceRule::Add(delta)) => balance.saturating_sub(delta.unsigned_abs()),
        }
    }

    /// Amount to return when `balance` exceeds the price.
    pub fn change_due(&self, balance: u64) -> Option<u64> {
        balance.checked_sub(self.price).filter(|&change| change > 0)
    }

    /// Amount still missing when `balance` is below the price.
    pub fn shortfall(&self, balance: u64) -> Option<u64> {
        self.price.checked_sub(balance).filter(|&missing| missing > 0)
    }
}
