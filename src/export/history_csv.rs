//! CSV export of self-play training history
//!
//! One row per epoch with the learner's reward and illegal-move count, the
//! two series plotted to judge whether training converges.

use std::path::Path;

use serde::Serialize;

use crate::{Result, pipeline::EpochSummary};

/// A single row of the history CSV
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    pub epoch: usize,
    pub reward: f64,
    pub failed_attempts: usize,
    pub learner_started: bool,
    pub learner_won: bool,
    pub turns: usize,
    /// Mean reward over the trailing window ending at this epoch
    pub rolling_reward: f64,
}

/// Exporter for training history CSV files
pub struct HistoryCsvExporter {
    window: usize,
}

impl HistoryCsvExporter {
    /// Rolling window used when none is given
    pub const DEFAULT_WINDOW: usize = 100;

    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Turn epoch summaries into CSV rows
    pub fn records(&self, history: &[EpochSummary]) -> Vec<HistoryRecord> {
        let mut window_sum = 0.0;
        history
            .iter()
            .enumerate()
            .map(|(i, summary)| {
                window_sum += summary.reward;
                if i >= self.window {
                    window_sum -= history[i - self.window].reward;
                }
                let len = (i + 1).min(self.window);
                HistoryRecord {
                    epoch: summary.epoch,
                    reward: summary.reward,
                    failed_attempts: summary.failed_attempts,
                    learner_started: summary.learner_started,
                    learner_won: summary.learner_won,
                    turns: summary.turns,
                    rolling_reward: window_sum / len as f64,
                }
            })
            .collect()
    }

    /// Write the history to `path`, header row included
    pub fn export<P: AsRef<Path>>(&self, path: P, history: &[EpochSummary]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in self.records(history) {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl Default for HistoryCsvExporter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
