//! Declarative table configuration.
//!
//! A table can be supplied as static configuration at startup instead of
//! being assembled in code. The format is plain JSON mirroring the catalog
//! types.

use crate::core::{StateInfo, SymbolInfo, Transition};
use crate::table::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Serializable description of a complete automaton.
///
/// # Example
///
/// ```rust
/// use vending_fsa::table::{FsaConfig, TransitionTable};
///
/// let config = FsaConfig::from_json(r#"{
///     "states": [
///         { "id": "q0", "description": "Start", "is_initial": true },
///         { "id": "q1", "description": "Done", "is_final": true }
///     ],
///     "alphabet": [ { "symbol": "a", "description": "Advance" } ],
///     "transitions": [ { "from": "q0", "symbol": "a", "to": "q1" } ]
/// }"#).unwrap();
///
/// let table = TransitionTable::from_config(config).unwrap();
/// assert_eq!(table.states().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FsaConfig {
    pub states: Vec<StateInfo>,
    pub alphabet: Vec<SymbolInfo>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl FsaConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
