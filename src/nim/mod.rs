//! Stick-removal game engine
//!
//! Four heaps of sticks start at `1, 3, 5, 7`. Players alternate taking one or
//! more sticks from a single heap; whoever takes the last stick loses.
//!
//! - [`Game`]: heap state, move validation, transitions and termination
//! - [`Action`]: a `(heap_index, amount)` move packed as `heap_index * 10 + amount`

pub mod action;
pub mod game;

pub use action::{Action, MAX_ACTION_CODE};
pub use game::{Game, GameStatus, HEAP_COUNT, INITIAL_HEAPS, MAX_STATE_CODE};
