//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::sync::{Arc, Mutex, MutexGuard};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, pipeline::EpochSummary, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    epochs: usize,
    total_reward: f64,
    failed_attempts: usize,
    snapshots: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            epochs: 0,
            total_reward: 0.0,
            failed_attempts: 0,
            snapshots: 0,
        }
    }

    fn message(&self) -> String {
        let epochs = self.epochs.max(1) as f64;
        format!(
            "reward:{:.3} fails/epoch:{:.2} snapshots:{}",
            self.total_reward / epochs,
            self.failed_attempts as f64 / epochs,
            self.snapshots
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_epochs: usize) -> Result<()> {
        let pb = ProgressBar::new(total_epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_epoch_end(&mut self, summary: &EpochSummary) -> Result<()> {
        self.epochs += 1;
        self.total_reward += summary.reward;
        self.failed_attempts += summary.failed_attempts;

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.epoch as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_snapshot(&mut self, _epoch: usize, _training_epochs: usize) -> Result<()> {
        self.snapshots += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub epochs: usize,
    pub learner_wins: usize,
    pub win_rate: f64,
    pub avg_reward: f64,
    pub avg_game_length: f64,
    pub failed_attempts: usize,
    pub snapshots: usize,
}

#[derive(Debug, Default)]
struct MetricsState {
    epochs: usize,
    learner_wins: usize,
    total_reward: f64,
    total_turns: usize,
    failed_attempts: usize,
    snapshots: usize,
}

/// Metrics observer - Tracks training metrics
///
/// Clones share their counters, so keep a clone to read the summary after
/// handing the observer to a trainer.
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    state: Arc<Mutex<MetricsState>>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MetricsState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        let state = self.state();
        let per_epoch = |total: f64| {
            if state.epochs == 0 {
                0.0
            } else {
                total / state.epochs as f64
            }
        };

        MetricsSummary {
            epochs: state.epochs,
            learner_wins: state.learner_wins,
            win_rate: per_epoch(state.learner_wins as f64),
            avg_reward: per_epoch(state.total_reward),
            avg_game_length: per_epoch(state.total_turns as f64),
            failed_attempts: state.failed_attempts,
            snapshots: state.snapshots,
        }
    }
}

impl Observer for MetricsObserver {
    fn on_epoch_end(&mut self, summary: &EpochSummary) -> Result<()> {
        let mut state = self.state();
        state.epochs += 1;
        if summary.learner_won {
            state.learner_wins += 1;
        }
        state.total_reward += summary.reward;
        state.total_turns += summary.turns;
        state.failed_attempts += summary.failed_attempts;
        Ok(())
    }

    fn on_snapshot(&mut self, _epoch: usize, _training_epochs: usize) -> Result<()> {
        self.state().snapshots += 1;
        Ok(())
    }
}
