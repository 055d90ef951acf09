//! Player port - anything that can make a move on a [`Game`]

use crate::{Result, nim::Game, q_learning::Turn};

/// Player trait - unified interface for every kind of mover
///
/// Implemented by the Q-learning agent and by the uniform-random baseline,
/// so evaluation code can pit either against the other.
///
/// # Examples
///
/// ```no_run
/// use nim_qlearn::{nim::Game, ports::Player};
///
/// fn play_out(first: &mut dyn Player, second: &mut dyn Player) -> nim_qlearn::Result<usize> {
///     let mut game = Game::new();
///     let mut turns = 0;
///     while !game.is_finished() {
///         let mover: &mut dyn Player = if turns % 2 == 0 { &mut *first } else { &mut *second };
///         mover.take_turn(&mut game)?;
///         turns += 1;
///     }
///     Ok(turns)
/// }
/// ```
pub trait Player {
    /// Make exactly one legal move on `game`.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is already finished.
    fn take_turn(&mut self, game: &mut Game) -> Result<Turn>;
}
