//! Input symbols of the automaton alphabet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single atomic input token: one character or a short code.
///
/// # Example
///
/// ```rust
/// use vending_fsa::core::Symbol;
///
/// let coin = Symbol::from('e');
/// assert_eq!(coin, Symbol::from("e"));
/// assert_eq!(coin.to_string(), "e");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split an input string into one-character symbols, skipping whitespace.
    ///
    /// ```rust
    /// use vending_fsa::core::Symbol;
    ///
    /// let symbols = Symbol::parse_word("ab c");
    /// assert_eq!(symbols, vec![Symbol::from('a'), Symbol::from('b'), Symbol::from('c')]);
    /// ```
    pub fn parse_word(input: &str) -> Vec<Symbol> {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Symbol::from)
            .collect()
    }

    /// Join symbols back into a single string.
    pub fn join(symbols: &[Symbol]) -> String {
        symbols.iter().map(Symbol::as_str).collect()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl From<&str> for Symbol {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for Symbol {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A symbol of the alphabet with its catalog description.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub symbol: Symbol,
    pub description: String,
}

impl SymbolInfo {
    pub fn new(symbol: impl Into<Symbol>, description: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            description: description.into(),
        }
    }
}
