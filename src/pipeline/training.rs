//! Self-play training pipeline

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    nim::Game,
    ports::{Observer, SnapshotRepository},
    q_learning::{SavedAgent, TdAgent},
};

/// Name under which agents are saved when none is given
pub const DEFAULT_AGENT_NAME: &str = "NimGameAI";

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Key under which snapshots are saved
    pub name: String,

    /// Number of self-play games
    pub epochs: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            epochs: 5000,
            seed: None,
        }
    }
}

/// Which side of a self-play game is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// The agent being trained
    Learner,
    /// The frozen snapshot it plays against
    Adversary,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Learner => Seat::Adversary,
            Seat::Adversary => Seat::Learner,
        }
    }
}

/// Per-epoch statistics, from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    pub epoch: usize,
    /// Sum of the learner's turn rewards
    pub reward: f64,
    /// Illegal proposals made by the learner
    pub failed_attempts: usize,
    pub learner_started: bool,
    pub learner_won: bool,
    /// Turns played by both seats
    pub turns: usize,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total epochs played
    pub epochs: usize,

    /// Games the learner won
    pub learner_wins: usize,

    /// Games the learner lost
    pub learner_losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Illegal proposals made by the learner over the whole run
    pub total_failed_attempts: usize,

    /// Learner epoch counts at which snapshots were saved
    pub snapshots: Vec<usize>,

    /// One entry per epoch
    pub history: Vec<EpochSummary>,
}

impl TrainingResult {
    /// Build a result from the per-epoch history
    pub fn new(history: Vec<EpochSummary>, snapshots: Vec<usize>) -> Self {
        let epochs = history.len();
        let learner_wins = history.iter().filter(|s| s.learner_won).count();
        let total_failed_attempts = history.iter().map(|s| s.failed_attempts).sum();
        let win_rate = if epochs > 0 {
            learner_wins as f64 / epochs as f64
        } else {
            0.0
        };

        Self {
            epochs,
            learner_wins,
            learner_losses: epochs - learner_wins,
            win_rate,
            total_failed_attempts,
            snapshots,
            history,
        }
    }

    /// Learner reward of each epoch, in order
    pub fn rewards(&self) -> Vec<f64> {
        self.history.iter().map(|s| s.reward).collect()
    }

    /// Learner illegal proposals of each epoch, in order
    pub fn failed_attempts(&self) -> Vec<usize> {
        self.history.iter().map(|s| s.failed_attempts).collect()
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Self-play trainer: a learning agent against a frozen copy of itself
///
/// The adversary starts as a deep copy of the learner and is refreshed from
/// it every `epochs / 10` epochs, at the same moment the learner's table is
/// saved, so the opponent grows stronger as training goes on.
pub struct SelfPlayTrainer {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl SelfPlayTrainer {
    /// Create a new trainer
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Epochs between two snapshots (never zero)
    pub fn snapshot_interval(&self) -> usize {
        (self.config.epochs / 10).max(1)
    }

    /// Train `learner` for the configured number of epochs
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `learner` is not in learning
    /// mode, and propagates repository and observer failures.
    pub fn run(
        &mut self,
        learner: &mut TdAgent,
        repository: &dyn SnapshotRepository,
    ) -> Result<TrainingResult> {
        if !learner.is_learning() {
            return Err(Error::InvalidConfiguration {
                message: "self-play training requires an agent in learning mode".to_string(),
            });
        }

        let seed = self.config.seed;
        if let Some(seed) = seed {
            learner.reseed(seed);
        }
        let mut adversary = learner.frozen_copy(seed.map(|s| s.wrapping_add(1)));
        let mut coin = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let interval = self.snapshot_interval();
        let mut history = Vec::with_capacity(self.config.epochs);
        let mut snapshots = Vec::new();

        for observer in &mut self.observers {
            observer.on_training_start(self.config.epochs)?;
        }

        for epoch in 0..self.config.epochs {
            learner.increment_training_epochs();

            if (epoch + 1) % interval == 0 {
                repository.save(&SavedAgent::from_agent(&self.config.name, learner))?;
                adversary.refresh_from(learner);
                snapshots.push(learner.training_epochs());

                for observer in &mut self.observers {
                    observer.on_snapshot(epoch, learner.training_epochs())?;
                }
            }

            // Fair coin: the adversary opens on a draw of at most one half
            let learner_started = coin.random::<f64>() > 0.5;
            let summary = self.play_epoch(epoch, learner_started, learner, &mut adversary)?;

            for observer in &mut self.observers {
                observer.on_epoch_end(&summary)?;
            }
            history.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(history, snapshots))
    }

    fn play_epoch(
        &mut self,
        epoch: usize,
        learner_started: bool,
        learner: &mut TdAgent,
        adversary: &mut TdAgent,
    ) -> Result<EpochSummary> {
        let mut game = Game::new();
        let mut seat = if learner_started {
            Seat::Learner
        } else {
            Seat::Adversary
        };
        let mut last_mover = seat;
        let mut reward = 0.0;
        let mut failed_attempts = 0;
        let mut turns = 0;

        while !game.is_finished() {
            let turn = match seat {
                Seat::Learner => learner.take_turn(&mut game)?,
                Seat::Adversary => adversary.take_turn(&mut game)?,
            };

            if seat == Seat::Learner {
                reward += turn.reward;
                failed_attempts += turn.failed_attempts;
            }

            for observer in &mut self.observers {
                observer.on_turn(epoch, seat, &turn)?;
            }

            last_mover = seat;
            seat = seat.other();
            turns += 1;
        }

        Ok(EpochSummary {
            epoch,
            reward,
            failed_attempts,
            learner_started,
            // Whoever takes the last stick loses
            learner_won: last_mover == Seat::Adversary,
            turns,
        })
    }
}
