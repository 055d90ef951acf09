//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use crate::{
    Result,
    pipeline::{EpochSummary, Seat},
    q_learning::Turn,
};

/// Observer trait for monitoring self-play training
///
/// Observers can be composed to collect different types of data during training.
/// Examples include:
/// - Progress bars for user feedback
/// - Recording per-epoch history
/// - Metrics tracking for evaluation
///
/// # Event Sequence
///
/// 1. `on_training_start(total_epochs)` - Once at the beginning
/// 2. For each epoch:
///    - `on_snapshot(epoch, training_epochs)` - When the learner is saved and
///      the adversary refreshed
///    - `on_turn(...)` - For each turn in the game
///    - `on_epoch_end(summary)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use nim_qlearn::{pipeline::EpochSummary, ports::Observer};
///
/// struct FailCounter {
///     failures: usize,
/// }
///
/// impl Observer for FailCounter {
///     fn on_epoch_end(&mut self, summary: &EpochSummary) -> nim_qlearn::Result<()> {
///         self.failures += summary.failed_attempts;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when training starts.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_training_start(&mut self, _total_epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every turn of the epoch's game, for both seats.
    fn on_turn(&mut self, _epoch: usize, _seat: Seat, _turn: &Turn) -> Result<()> {
        Ok(())
    }

    /// Called once the epoch's game is finished.
    fn on_epoch_end(&mut self, _summary: &EpochSummary) -> Result<()> {
        Ok(())
    }

    /// Called after the learner was saved and the adversary refreshed.
    fn on_snapshot(&mut self, _epoch: usize, _training_epochs: usize) -> Result<()> {
        Ok(())
    }

    /// Called when training ends.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
