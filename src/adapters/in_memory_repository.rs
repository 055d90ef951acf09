//! In-memory snapshot repository for testing.
//!
//! This adapter provides a pure in-memory implementation of
//! SnapshotRepository, enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::SavedAgent};

/// In-memory repository for testing.
///
/// Stores MessagePack-encoded snapshots in a shared HashMap, so clones see
/// each other's saves.
///
/// # Examples
///
/// ```
/// use nim_qlearn::adapters::InMemoryRepository;
/// use nim_qlearn::ports::SnapshotRepository;
/// use nim_qlearn::q_learning::{AgentMode, SavedAgent, TdAgent};
///
/// let repo = InMemoryRepository::new();
/// let agent = TdAgent::new(0.1, 0.9, AgentMode::Learning);
///
/// repo.save(&SavedAgent::from_agent("demo", &agent))?;
/// let loaded = repo.load("demo", 0)?;
/// assert_eq!(loaded.q_table, *agent.q_table());
/// # Ok::<(), nim_qlearn::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<(String, usize), Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<(String, usize), Vec<u8>>> {
        // A poisoned map still holds complete entries; keep using it.
        self.storage
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Epoch counts saved under `name`, ascending.
    pub fn saved_epochs(&self, name: &str) -> Vec<usize> {
        let mut epochs: Vec<usize> = self
            .storage()
            .keys()
            .filter(|(stored, _)| stored == name)
            .map(|&(_, epochs)| epochs)
            .collect();
        epochs.sort_unstable();
        epochs
    }

    /// Remove every stored snapshot.
    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn save(&self, snapshot: &SavedAgent) -> Result<()> {
        let bytes = rmp_serde::to_vec(snapshot).map_err(|e| Error::SerializationContext {
            operation: "serialize snapshot for in-memory storage".to_string(),
            message: e.to_string(),
        })?;

        self.storage()
            .insert((snapshot.name.clone(), snapshot.training_epochs), bytes);
        Ok(())
    }

    fn load(&self, name: &str, training_epochs: usize) -> Result<SavedAgent> {
        let storage = self.storage();
        let bytes = storage
            .get(&(name.to_string(), training_epochs))
            .ok_or_else(|| Error::AgentSnapshotNotFound {
                name: name.to_string(),
                training_epochs,
            })?;

        let mut snapshot: SavedAgent =
            rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
                operation: "deserialize snapshot from in-memory storage".to_string(),
                message: e.to_string(),
            })?;
        snapshot.training_epochs = training_epochs;
        Ok(snapshot)
    }

    fn exists(&self, name: &str, training_epochs: usize) -> bool {
        self.storage()
            .contains_key(&(name.to_string(), training_epochs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::{AgentMode, TdAgent};

    fn snapshot(name: &str, epochs: usize) -> SavedAgent {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Learning);
        for _ in 0..epochs {
            agent.increment_training_epochs();
        }
        SavedAgent::from_agent(name, &agent)
    }

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.count(), 0);
        assert!(!repo.exists("a", 2));

        repo.save(&snapshot("a", 2)).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.exists("a", 2));

        let loaded = repo.load("a", 2).unwrap();
        assert_eq!(loaded, snapshot("a", 2));
    }

    #[test]
    fn test_load_nonexistent_returns_not_found() {
        let repo = InMemoryRepository::new();
        assert!(matches!(
            repo.load("nobody", 1),
            Err(Error::AgentSnapshotNotFound { .. })
        ));
    }

    #[test]
    fn test_saved_epochs_sorted_per_name() {
        let repo = InMemoryRepository::new();
        repo.save(&snapshot("a", 20)).unwrap();
        repo.save(&snapshot("a", 10)).unwrap();
        repo.save(&snapshot("b", 5)).unwrap();
        assert_eq!(repo.saved_epochs("a"), vec![10, 20]);

        repo.clear();
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        repo1.save(&snapshot("shared", 0)).unwrap();
        assert!(repo2.exists("shared", 0));
    }
}
