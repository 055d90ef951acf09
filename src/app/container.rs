//! Dependency injection container for the application.
//!
//! The container owns the snapshot repository and provides factory methods
//! for creating, loading and training agents.

use std::{path::PathBuf, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::MsgPackRepository,
    pipeline::{Observer, SelfPlayTrainer, TrainingConfig, TrainingResult},
    ports::SnapshotRepository,
    q_learning::{AgentMode, SavedAgent, TdAgent},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use nim_qlearn::app::{App, AgentConfig};
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::new().with_seed(42))?;
/// # Ok::<(), nim_qlearn::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use nim_qlearn::app::App;
/// use nim_qlearn::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for snapshot persistence
    repository: Arc<dyn SnapshotRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `MsgPackRepository` under `cache/`
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::default()),
            default_seed: None,
        }
    }

    /// Create an app whose snapshots live under `cache_dir`.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new(cache_dir)),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Create a fresh agent with the given configuration.
    pub fn create_agent(&self, config: AgentConfig) -> Result<TdAgent> {
        let config = match (config.seed, self.default_seed) {
            (None, Some(seed)) => config.with_seed(seed),
            _ => config,
        };
        config.build()
    }

    /// Load the agent saved as `name` after `training_epochs` epochs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::AgentSnapshotNotFound`] if it was never saved.
    pub fn load_agent(
        &self,
        name: &str,
        training_epochs: usize,
        mode: AgentMode,
    ) -> Result<TdAgent> {
        self.repository
            .load(name, training_epochs)?
            .to_agent(mode, self.default_seed)
    }

    /// Save `agent` under `name` and its current epoch count.
    pub fn save_agent(&self, name: &str, agent: &TdAgent) -> Result<()> {
        self.repository.save(&SavedAgent::from_agent(name, agent))
    }

    /// Train a fresh agent by self-play, saving snapshots along the way.
    pub fn train(
        &self,
        agent_config: AgentConfig,
        training_config: TrainingConfig,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<(TdAgent, TrainingResult)> {
        let training_config = TrainingConfig {
            seed: training_config.seed.or(self.default_seed),
            ..training_config
        };
        let mut learner = self.create_agent(agent_config.with_mode(AgentMode::Learning))?;

        let mut trainer = observers
            .into_iter()
            .fold(SelfPlayTrainer::new(training_config), |trainer, observer| {
                trainer.with_observer(observer)
            });

        let result = trainer.run(&mut learner, self.repository.as_ref())?;
        Ok((learner, result))
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an [`App`] with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn SnapshotRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom repository.
    pub fn with_repository<R: SnapshotRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set the default seed for agents and trainers.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app, using `MsgPackRepository` if no repository was provided.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::default())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
