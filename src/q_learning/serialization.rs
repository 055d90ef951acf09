//! Snapshot format for trained agents.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{
        agent::{AgentMode, TdAgent},
        q_table::QTable,
    },
};

/// Whole-table snapshot of an agent, keyed by name and epoch count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    pub name: String,
    pub training_epochs: usize,
    pub q_table: QTable,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(name: impl Into<String>, agent: &TdAgent) -> Self {
        Self {
            version: Self::VERSION,
            name: name.into(),
            training_epochs: agent.training_epochs(),
            q_table: agent.q_table().clone(),
        }
    }

    /// Rebuild an agent from the snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshotVersion`] for snapshots written by
    /// another format version, and [`Error::InvalidSnapshot`] if the table
    /// does not cover every state and action.
    pub fn to_agent(&self, mode: AgentMode, seed: Option<u64>) -> Result<TdAgent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        self.q_table.validate_shape()?;

        Ok(TdAgent::from_parts(
            self.q_table.clone(),
            self.training_epochs,
            mode,
            seed,
        ))
    }

    /// File name used by on-disk repositories
    pub fn file_name(name: &str, training_epochs: usize) -> String {
        format!("agent-{name}-{training_epochs}-epochs.msgpack")
    }
}
