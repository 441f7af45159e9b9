//! Read-only session snapshots.
//!
//! A snapshot is everything a presentation layer needs to render a session:
//! where it is, what it has consumed, what it may do next. Snapshots are
//! detached values; changing one never affects the session it came from.

use crate::core::{StateId, Symbol};
use crate::walker::{Move, Session, SessionStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable view of a session at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Snapshot format version
    pub version: u32,

    pub session_id: Uuid,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// When this snapshot was taken
    pub taken_at: DateTime<Utc>,

    pub status: SessionStatus,
    pub current_state: StateId,
    pub current_description: Option<String>,
    pub balance: u64,
    pub price: u64,

    /// Visited states, starting with the initial state
    pub path: Vec<StateId>,

    /// Consumed symbols in order
    pub symbols: Vec<Symbol>,

    pub available_moves: Vec<Move>,
}

impl SessionSnapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session_id: session.id(),
            started_at: session.started_at(),
            taken_at: Utc::now(),
            status: session.status(),
            current_state: session.current_state().clone(),
            current_description: session
                .current_state_info()
                .map(|s| s.description.clone()),
            balance: session.balance(),
            price: session.price(),
            path: session.path().into_iter().cloned().collect(),
            symbols: session.symbols().into_iter().cloned().collect(),
            available_moves: session.available_moves(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(self)
    }
}
