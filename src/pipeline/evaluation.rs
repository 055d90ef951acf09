//! Evaluation of trained agents against a random baseline

use rand::{SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    nim::Game,
    ports::Player,
    q_learning::{TdAgent, Turn, agent::move_reward},
};

/// Uniform random player
///
/// Picks any legal action with equal probability; never proposes an illegal
/// move.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// Create a new random player
    pub fn new() -> Self {
        Self {
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random player with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn take_turn(&mut self, game: &mut Game) -> Result<Turn> {
        let action = *game
            .legal_actions()
            .choose(&mut self.rng)
            .ok_or(Error::NoLegalActions)?;
        game.apply_action(action)?;

        Ok(Turn {
            heap_index: action.heap_index(),
            amount: action.amount(),
            reward: move_reward(game.remaining()),
            failed_attempts: 0,
        })
    }
}

/// Outcome of an evaluation run, from the evaluated player's side
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    /// Illegal proposals made by the evaluated player
    pub failed_attempts: usize,
}

impl EvaluationResult {
    pub fn new(games: usize, wins: usize, failed_attempts: usize) -> Self {
        let win_rate = if games > 0 {
            wins as f64 / games as f64
        } else {
            0.0
        };
        Self {
            games,
            wins,
            losses: games - wins,
            win_rate,
            failed_attempts,
        }
    }
}

/// Play `games` matches, alternating who opens; `player` opens the even ones
pub fn evaluate(
    player: &mut dyn Player,
    opponent: &mut dyn Player,
    games: usize,
) -> Result<EvaluationResult> {
    let mut wins = 0;
    let mut failed_attempts = 0;

    for game_num in 0..games {
        let mut game = Game::new();
        let mut player_to_move = game_num % 2 == 0;
        let mut player_moved_last = false;

        while !game.is_finished() {
            if player_to_move {
                failed_attempts += player.take_turn(&mut game)?.failed_attempts;
            } else {
                opponent.take_turn(&mut game)?;
            }
            player_moved_last = player_to_move;
            player_to_move = !player_to_move;
        }

        if !player_moved_last {
            wins += 1;
        }
    }

    Ok(EvaluationResult::new(games, wins, failed_attempts))
}

/// Evaluate a frozen copy of `agent` against a [`RandomPlayer`]
///
/// The agent itself is not modified.
pub fn evaluate_against_random(
    agent: &TdAgent,
    games: usize,
    seed: Option<u64>,
) -> Result<EvaluationResult> {
    let mut frozen = agent.frozen_copy(seed);
    let mut random_player = match seed {
        Some(seed) => RandomPlayer::with_seed(seed.wrapping_add(1)),
        None => RandomPlayer::new(),
    };
    evaluate(&mut frozen, &mut random_player, games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q_learning::AgentMode;

    #[test]
    fn test_random_player() {
        let mut player = RandomPlayer::with_seed(1);
        let mut game = Game::new();
        let turn = player.take_turn(&mut game).unwrap();
        assert_eq!(game.remaining(), 16 - turn.amount);
        assert_eq!(turn.failed_attempts, 0);
    }

    #[test]
    fn test_random_player_on_finished_game() {
        let mut player = RandomPlayer::with_seed(1);
        let mut game = Game::from_heaps([0, 0, 0, 0]).unwrap();
        assert!(player.take_turn(&mut game).is_err());
    }

    #[test]
    fn test_random_vs_random_counts() {
        let mut a = RandomPlayer::with_seed(3);
        let mut b = RandomPlayer::with_seed(4);
        let result = evaluate(&mut a, &mut b, 40).unwrap();
        assert_eq!(result.games, 40);
        assert_eq!(result.wins + result.losses, 40);
        assert!(result.win_rate >= 0.0 && result.win_rate <= 1.0);
    }

    #[test]
    fn test_evaluation_does_not_touch_agent() {
        let agent = TdAgent::new(0.5, 0.9, AgentMode::Learning);
        let result = evaluate_against_random(&agent, 10, Some(11)).unwrap();
        assert_eq!(result.games, 10);
        assert_eq!(result.failed_attempts, 0);
        assert_eq!(agent.q_table().nonzero_count(), 0);
    }

    #[test]
    fn test_evaluation_is_reproducible_with_seed() {
        let agent = TdAgent::new(0.5, 0.9, AgentMode::Learning);
        let first = evaluate_against_random(&agent, 30, Some(5)).unwrap();
        let second = evaluate_against_random(&agent, 30, Some(5)).unwrap();
        assert_eq!(first.wins, second.wins);
    }
}
