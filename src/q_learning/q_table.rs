//! Dense Q-table for temporal difference learning

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    nim::{Action, MAX_ACTION_CODE, MAX_STATE_CODE},
};

/// Q-table mapping (encoded state, action code) pairs to Q-values
///
/// Pre-sized to every encodable state and action, zero-initialised. Rows are
/// encoded states, columns are action codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Row-major Q-values, `rows * cols` entries
    values: Vec<f64>,
    rows: usize,
    cols: usize,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a zeroed Q-table covering every state and action code
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        let rows = MAX_STATE_CODE + 1;
        let cols = MAX_ACTION_CODE + 1;
        Self {
            values: vec![0.0; rows * cols],
            rows,
            cols,
            learning_rate,
            discount_factor,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Number of encoded states (rows)
    pub fn num_states(&self) -> usize {
        self.rows
    }

    /// Number of action codes (columns)
    pub fn num_actions(&self) -> usize {
        self.cols
    }

    /// Check that a decoded table covers exactly the encodable states and actions
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSnapshot`] on a dimension or length mismatch.
    pub fn validate_shape(&self) -> Result<()> {
        let (rows, cols) = (MAX_STATE_CODE + 1, MAX_ACTION_CODE + 1);
        if self.rows != rows || self.cols != cols {
            return Err(Error::InvalidSnapshot {
                message: format!(
                    "Q-table is {}x{}, expected {rows}x{cols}",
                    self.rows, self.cols
                ),
            });
        }
        if self.values.len() != rows * cols {
            return Err(Error::InvalidSnapshot {
                message: format!(
                    "Q-table holds {} values, expected {}",
                    self.values.len(),
                    rows * cols
                ),
            });
        }
        Ok(())
    }

    fn index(&self, state: usize, action: Action) -> usize {
        assert!(
            state < self.rows && action.code() < self.cols,
            "state {state} / action {} outside Q-table",
            action.code()
        );
        state * self.cols + action.code()
    }

    /// Get Q-value for a state-action pair
    ///
    /// # Panics
    ///
    /// Panics if the state or action code lies outside the table.
    pub fn get(&self, state: usize, action: Action) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: Action, value: f64) {
        let idx = self.index(state, action);
        self.values[idx] = value;
    }

    /// Every Q-value of one state, indexed by action code
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.cols;
        &self.values[start..start + self.cols]
    }

    /// Maximum over the whole row of a state, legal or not
    pub fn max_q(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// All legal actions sharing the highest Q-value in `state`
    ///
    /// Illegal columns are masked to `-∞` on a scratch copy of the row, so
    /// the table is never modified.
    pub fn best_actions(&self, state: usize, legal_actions: &[Action]) -> Vec<Action> {
        if legal_actions.is_empty() {
            return Vec::new();
        }

        let mut masked = vec![f64::NEG_INFINITY; self.cols];
        for &action in legal_actions {
            masked[action.code()] = self.get(state, action);
        }

        let best = masked.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        legal_actions
            .iter()
            .copied()
            .filter(|action| masked[action.code()] == best)
            .collect()
    }

    /// TD update of a single state-action pair
    ///
    /// With a successor state:
    /// Q(s,a) ← Q(s,a) + α[r − γ max_a' Q(s',a') − Q(s,a)]
    ///
    /// Without one (the action was illegal):
    /// Q(s,a) ← Q(s,a) + α[r − Q(s,a)]
    ///
    /// The discounted successor value is subtracted, not added.
    pub fn td_update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: Option<usize>,
    ) {
        let current_q = self.get(state, action);
        let td_error = match next_state {
            Some(next) => reward - self.discount_factor * self.max_q(next) - current_q,
            None => reward - current_q,
        };
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    /// Number of entries that have moved away from zero
    pub fn nonzero_count(&self) -> usize {
        self.values.iter().filter(|&&q| q != 0.0).count()
    }
}
