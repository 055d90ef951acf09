//! Configuration types for agent creation.

use crate::{
    Error, Result,
    q_learning::{AgentMode, DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE, TdAgent},
};

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use nim_qlearn::app::AgentConfig;
/// use nim_qlearn::q_learning::AgentMode;
///
/// let config = AgentConfig::new()
///     .with_learning_rate(0.2)
///     .with_discount_factor(0.95)
///     .with_mode(AgentMode::Learning)
///     .with_seed(42);
/// let agent = config.build()?;
/// # Ok::<(), nim_qlearn::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Learning or frozen play
    pub mode: AgentMode,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration with default values:
    /// - Learning rate: 0.1
    /// - Discount factor: 0.9
    /// - Mode: `AgentMode::Learning`
    /// - Seed: None (non-deterministic)
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            mode: AgentMode::Learning,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_mode(mut self, mode: AgentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that α and γ are finite and within [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{label} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Validate and create the agent.
    pub fn build(&self) -> Result<TdAgent> {
        self.validate()?;
        let agent = TdAgent::new(self.learning_rate, self.discount_factor, self.mode);
        Ok(match self.seed {
            Some(seed) => agent.with_seed(seed),
            None => agent,
        })
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}
