//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Self-play training of a Q-learning agent against a frozen copy of itself
//! - Evaluating trained agents against a random baseline
//! - Recording observations during training

pub mod evaluation;
pub mod observers;
pub mod training;

pub use evaluation::{EvaluationResult, RandomPlayer, evaluate, evaluate_against_random};
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{
    DEFAULT_AGENT_NAME, EpochSummary, Seat, SelfPlayTrainer, TrainingConfig, TrainingResult,
};

pub use crate::ports::{Observer, Player};
