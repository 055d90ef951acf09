//! Tabular Q-learning for the stick game
//!
//! The agent keeps a dense Q-table indexed by (encoded state, action code),
//! selects moves ε-greedily over the legal actions of the current position
//! and updates one entry per move attempt.
//!
//! ## Update rule
//!
//! | Attempt | Update |
//! |---------|--------|
//! | Legal, successor `s'` | `Q += α (r − γ max_a' Q(s',a') − Q)` |
//! | Illegal, no successor | `Q += α (r − Q)` |
//!
//! ## Usage Example
//!
//! ```no_run
//! use nim_qlearn::{nim::Game, q_learning::{AgentMode, TdAgent}};
//!
//! let mut agent = TdAgent::new(
//!     0.1, // learning_rate
//!     0.9, // discount_factor
//!     AgentMode::Learning,
//! )
//! .with_seed(42);
//!
//! let mut game = Game::new();
//! let turn = agent.take_turn(&mut game)?;
//! println!("took {} from heap {}", turn.amount, turn.heap_index);
//! # Ok::<(), nim_qlearn::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{
    AgentMode, DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE, ILLEGAL_MOVE_PENALTY, TdAgent, Turn,
};
pub use q_table::QTable;
pub use serialization::SavedAgent;
