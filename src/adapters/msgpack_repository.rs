//! MessagePack implementation of the snapshot repository.
//!
//! This adapter implements the SnapshotRepository port using rmp_serde for
//! compact binary serialization, one file per (name, epochs) key.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::SavedAgent};

/// Default directory for cached agents
pub const DEFAULT_CACHE_DIR: &str = "cache";

/// MessagePack-based snapshot repository.
///
/// Stores `agent-<name>-<epochs>-epochs.msgpack` files under a cache
/// directory, creating the directory on first save.
///
/// # Examples
///
/// ```no_run
/// use nim_qlearn::adapters::MsgPackRepository;
/// use nim_qlearn::ports::SnapshotRepository;
///
/// let repo = MsgPackRepository::default();
/// let snapshot = repo.load("NimGameAI", 5000)?;
/// # Ok::<(), nim_qlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MsgPackRepository {
    cache_dir: PathBuf,
}

impl MsgPackRepository {
    /// Create a repository rooted at `cache_dir`.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Path of the file holding the given key.
    pub fn path_for(&self, name: &str, training_epochs: usize) -> PathBuf {
        self.cache_dir
            .join(SavedAgent::file_name(name, training_epochs))
    }
}

impl Default for MsgPackRepository {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_DIR)
    }
}

impl SnapshotRepository for MsgPackRepository {
    fn save(&self, snapshot: &SavedAgent) -> Result<()> {
        fs::create_dir_all(&self.cache_dir).map_err(|source| Error::Io {
            operation: format!("create cache directory {:?}", self.cache_dir),
            source,
        })?;

        let path = self.path_for(&snapshot.name, snapshot.training_epochs);
        let file = File::create(&path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, snapshot).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize agent snapshot to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(())
    }

    fn load(&self, name: &str, training_epochs: usize) -> Result<SavedAgent> {
        let path = self.path_for(name, training_epochs);
        if !path.exists() {
            return Err(Error::AgentSnapshotNotFound {
                name: name.to_string(),
                training_epochs,
            });
        }

        let file = File::open(&path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let mut snapshot: SavedAgent = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| Error::SerializationContext {
                operation: "deserialize agent snapshot from MessagePack".to_string(),
                message: e.to_string(),
            })?;
        snapshot.training_epochs = training_epochs;

        Ok(snapshot)
    }

    fn exists(&self, name: &str, training_epochs: usize) -> bool {
        self.path_for(name, training_epochs).exists()
    }
}
