//! Repository port for agent snapshot persistence.
//!
//! This module defines the trait boundary between the learning core and the
//! storage of trained Q-tables.

use crate::{Result, q_learning::SavedAgent};

/// Port for persisting and loading agent snapshots.
///
/// Snapshots are keyed by agent name and training epoch count. The storage
/// format is up to the implementation, but a save followed by a load of the
/// same key must reproduce the snapshot exactly.
///
/// # Examples
///
/// ```no_run
/// use nim_qlearn::{
///     adapters::MsgPackRepository,
///     ports::SnapshotRepository,
///     q_learning::{AgentMode, SavedAgent, TdAgent},
/// };
///
/// let repo = MsgPackRepository::new("cache");
/// let agent = TdAgent::new(0.1, 0.9, AgentMode::Learning);
/// repo.save(&SavedAgent::from_agent("NimGameAI", &agent))?;
/// let loaded = repo.load("NimGameAI", 0)?;
/// # Ok::<(), nim_qlearn::Error>(())
/// ```
pub trait SnapshotRepository {
    /// Save a snapshot under its own name and epoch count.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn save(&self, snapshot: &SavedAgent) -> Result<()>;

    /// Load the snapshot saved for `name` after `training_epochs` epochs.
    ///
    /// The returned snapshot's `training_epochs` equals the requested count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AgentSnapshotNotFound`] if nothing was saved
    /// under that key, or a serialization error if the stored data is corrupt.
    fn load(&self, name: &str, training_epochs: usize) -> Result<SavedAgent>;

    /// Whether a snapshot exists for the key.
    fn exists(&self, name: &str, training_epochs: usize) -> bool;
}
