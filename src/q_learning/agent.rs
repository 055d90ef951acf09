//! Tabular Q-learning agent
//!
//! The agent picks moves ε-greedily over the legal actions of the current
//! position, retries (and is penalised) until it proposes a legal move, and
//! in learning mode updates its Q-table after every attempt.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    nim::{Action, Game},
    ports::Player,
    q_learning::q_table::QTable,
};

/// Default learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

/// Default discount factor γ
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;

/// Reward charged for every illegal move attempt
pub const ILLEGAL_MOVE_PENALTY: f64 = -10.0;

/// Exploration floor of the learning-mode ε schedule
const EPSILON_FLOOR: f64 = 0.1;

/// Decay exponent of the learning-mode ε schedule
const EPSILON_DECAY_EXPONENT: f64 = -0.8;

/// Whether the agent explores and updates its table, or plays greedily
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMode {
    /// ε-greedy with decaying ε, Q-table updated after every attempt
    Learning,
    /// Pure greedy, Q-table never touched
    Frozen,
}

/// What happened during one call to [`TdAgent::take_turn`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub heap_index: usize,
    pub amount: usize,
    /// Illegal-move penalties plus the reward of the move finally played
    pub reward: f64,
    /// Illegal proposals before a legal one
    pub failed_attempts: usize,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Step reward seen by the mover once its move is on the table
///
/// Leaving exactly one stick forces the opponent to take it; taking the last
/// stick loses.
pub(crate) fn move_reward(remaining: usize) -> f64 {
    match remaining {
        1 => 1.0,
        0 => -1.0,
        _ => 0.0,
    }
}

/// Q-learning agent (off-policy TD control) over a dense Q-table
#[derive(Debug, Clone)]
pub struct TdAgent {
    q_table: QTable,
    training_epochs: usize,
    mode: AgentMode,
    rng: StdRng,
}

impl TdAgent {
    /// Create an agent with a zeroed Q-table
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `mode` - learning or frozen play
    pub fn new(learning_rate: f64, discount_factor: f64, mode: AgentMode) -> Self {
        Self::from_parts(QTable::new(learning_rate, discount_factor), 0, mode, None)
    }

    pub(crate) fn from_parts(
        q_table: QTable,
        training_epochs: usize,
        mode: AgentMode,
        seed: Option<u64>,
    ) -> Self {
        Self {
            q_table,
            training_epochs,
            mode,
            rng: build_rng(seed),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AgentMode) {
        self.mode = mode;
    }

    pub fn is_learning(&self) -> bool {
        self.mode == AgentMode::Learning
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn training_epochs(&self) -> usize {
        self.training_epochs
    }

    pub fn increment_training_epochs(&mut self) {
        self.training_epochs += 1;
    }

    /// Exploration rate for the current mode
    ///
    /// Learning: `0.1 + (training_epochs + 1)^-0.8`, which starts at 1.1 and
    /// decays towards 0.1. Frozen: 0.
    pub fn epsilon(&self) -> f64 {
        match self.mode {
            AgentMode::Learning => {
                EPSILON_FLOOR + ((self.training_epochs + 1) as f64).powf(EPSILON_DECAY_EXPONENT)
            }
            AgentMode::Frozen => 0.0,
        }
    }

    /// ε-greedy action selection restricted to the legal actions of `game`
    ///
    /// Explores when a uniform draw is at most `epsilon`; otherwise picks
    /// uniformly among the legal actions with the highest Q-value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if the game is already finished.
    pub fn select_action(&mut self, game: &Game, epsilon: f64) -> Result<Action> {
        let legal_actions = game.legal_actions();
        if legal_actions.is_empty() {
            return Err(Error::NoLegalActions);
        }

        let candidates = if self.rng.random::<f64>() <= epsilon {
            legal_actions
        } else {
            self.q_table
                .best_actions(game.encoded_state(), &legal_actions)
        };

        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalActions)
    }

    /// Select with the ε of the current mode
    pub fn choose_action(&mut self, game: &Game) -> Result<Action> {
        let epsilon = self.epsilon();
        self.select_action(game, epsilon)
    }

    /// Apply the TD rule to one state-action pair
    ///
    /// Pass `None` for `next_state` when the action was illegal and there is
    /// no successor to bootstrap from.
    pub fn update_value(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: Option<usize>,
    ) {
        self.q_table.td_update(state, action, reward, next_state);
    }

    /// Play one move on `game`, retrying until the proposed move is legal
    ///
    /// Every illegal proposal costs [`ILLEGAL_MOVE_PENALTY`]. In learning
    /// mode each attempt, legal or not, updates the Q-table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if the game is already finished.
    pub fn take_turn(&mut self, game: &mut Game) -> Result<Turn> {
        self.take_turn_with(game, |agent, game| agent.choose_action(game))
    }

    /// [`take_turn`](Self::take_turn) with the proposal step supplied by `propose`
    pub(crate) fn take_turn_with<F>(&mut self, game: &mut Game, mut propose: F) -> Result<Turn>
    where
        F: FnMut(&mut Self, &Game) -> Result<Action>,
    {
        let state = game.encoded_state();
        let mut action = propose(&mut *self, &*game)?;
        let mut reward = 0.0;
        let mut failed_attempts = 0;

        while !game.is_valid_move(action.heap_index(), action.amount()) {
            reward += ILLEGAL_MOVE_PENALTY;
            failed_attempts += 1;
            if self.is_learning() {
                self.update_value(state, action, ILLEGAL_MOVE_PENALTY, None);
            }
            action = propose(&mut *self, &*game)?;
        }

        game.apply_action(action)?;

        let step_reward = move_reward(game.remaining());
        reward += step_reward;
        if self.is_learning() {
            self.update_value(state, action, step_reward, Some(game.encoded_state()));
        }

        Ok(Turn {
            heap_index: action.heap_index(),
            amount: action.amount(),
            reward,
            failed_attempts,
        })
    }

    /// Independent frozen copy of this agent's table and epoch count
    pub fn frozen_copy(&self, seed: Option<u64>) -> Self {
        Self::from_parts(
            self.q_table.clone(),
            self.training_epochs,
            AgentMode::Frozen,
            seed,
        )
    }

    /// Overwrite this agent's table and epoch count with a deep copy of
    /// `other`'s, keeping this agent's mode and random source
    pub fn refresh_from(&mut self, other: &TdAgent) {
        self.q_table.clone_from(&other.q_table);
        self.training_epochs = other.training_epochs;
    }

    /// Reseed the random source
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

impl Player for TdAgent {
    fn take_turn(&mut self, game: &mut Game) -> Result<Turn> {
        TdAgent::take_turn(self, game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(code: usize) -> Action {
        Action::from_code(code).unwrap()
    }

    #[test]
    fn test_epsilon_schedule() {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Learning);
        assert!((agent.epsilon() - 1.1).abs() < 1e-12);

        for _ in 0..99 {
            agent.increment_training_epochs();
        }
        let expected = 0.1 + 100f64.powf(-0.8);
        assert!((agent.epsilon() - expected).abs() < 1e-12);

        agent.set_mode(AgentMode::Frozen);
        assert_eq!(agent.epsilon(), 0.0);
    }

    #[test]
    fn test_epsilon_decreases_towards_floor() {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Learning);
        let mut previous = agent.epsilon();
        for _ in 0..1000 {
            agent.increment_training_epochs();
            let current = agent.epsilon();
            assert!(current < previous);
            assert!(current > 0.1);
            previous = current;
        }
    }

    #[test]
    fn test_greedy_selection_picks_best_legal_action() {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Frozen).with_seed(3);
        let game = Game::new();
        agent.q_table.set(1357, action(23), 0.8);
        agent.q_table.set(1357, action(37), 0.2);

        for _ in 0..20 {
            assert_eq!(agent.select_action(&game, 0.0).unwrap(), action(23));
        }
    }

    #[test]
    fn test_greedy_selection_breaks_ties_randomly() {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Frozen).with_seed(5);
        let game = Game::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(agent.select_action(&game, 0.0).unwrap());
        }
        // All 16 legal actions tie at zero
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_select_on_finished_game_fails() {
        let mut agent = TdAgent::new(0.1, 0.9, AgentMode::Frozen);
        let game = Game::from_heaps([0, 0, 0, 0]).unwrap();
        assert!(matches!(
            agent.select_action(&game, 0.5),
            Err(Error::NoLegalActions)
        ));
    }

    #[test]
    fn test_take_turn_rewards_leaving_one_stick() {
        let mut agent = TdAgent::new(0.5, 0.9, AgentMode::Frozen).with_seed(1);
        let mut game = Game::from_heaps([0, 0, 2, 0]).unwrap();
        agent.q_table.set(20, action(21), 5.0);

        let turn = agent.take_turn(&mut game).unwrap();

        assert_eq!(game.heaps(), [0, 0, 1, 0]);
        assert_eq!((turn.heap_index, turn.amount), (2, 1));
        assert_eq!(turn.failed_attempts, 0);
        assert_eq!(turn.reward, 1.0);
    }

    #[test]
    fn test_take_turn_penalises_taking_last_stick() {
        let mut agent = TdAgent::new(0.5, 0.9, AgentMode::Learning).with_seed(9);
        let mut game = Game::from_heaps([0, 1, 0, 0]).unwrap();

        let turn = agent.take_turn(&mut game).unwrap();

        assert!(game.is_finished());
        assert_eq!((turn.heap_index, turn.amount), (1, 1));
        assert_eq!(turn.reward, -1.0);
        // Q(100, 11) = 0 + 0.5 * (-1 - 0.9 * 0 - 0) = -0.5
        assert!((agent.q_table().get(100, action(11)) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_frozen_turn_leaves_table_untouched() {
        let mut agent = TdAgent::new(0.5, 0.9, AgentMode::Frozen).with_seed(2);
        let mut game = Game::new();
        agent.take_turn(&mut game).unwrap();
        assert_eq!(agent.q_table().nonzero_count(), 0);
        assert!(game.remaining() < 16);
    }

    /// Proposes `script` in order, ignoring the agent's own policy
    fn scripted(script: &[usize]) -> impl FnMut(&mut TdAgent, &Game) -> Result<Action> + '_ {
        let mut codes = script.iter();
        move |_, _| codes.next().map(|&code| action(code)).ok_or(Error::NoLegalActions)
    }

    #[test]
    fn test_illegal_proposals_are_penalised_and_learned() {
        let mut agent = TdAgent::new(0.5, 0.9, AgentMode::Learning).with_seed(1);
        let mut game = Game::from_heaps([0, 0, 2, 0]).unwrap();

        // Empty heap 0, too many from heap 2, then leave one stick
        let turn = agent.take_turn_with(&mut game, scripted(&[1, 23, 21])).unwrap();

        assert_eq!(turn.failed_attempts, 2);
        assert_eq!(turn.reward, 2.0 * ILLEGAL_MOVE_PENALTY + 1.0);
        assert_eq!((turn.heap_index, turn.amount), (2, 1));
        assert_eq!(game.heaps(), [0, 0, 1, 0]);

        let q = agent.q_table();
        assert_eq!(q.get(20, action(1)), -5.0);
        assert_eq!(q.get(20, action(23)), -5.0);
        // Successor row 1 is still zero: 0.5 * (1 - 0.9 * 0 - 0)
        assert_eq!(q.get(20, action(21)), 0.5);
    }

    #[test]
    fn test_frozen_agent_counts_illegal_proposals_without_learning() {
        let mut agent = TdAgent::new(0.5, 0.9, AgentMode::Frozen).with_seed(1);
        let mut game = Game::from_heaps([0, 0, 2, 0]).unwrap();

        let turn = agent
            .take_turn_with(&mut game, scripted(&[9, 1, 23, 22]))
            .unwrap();

        assert_eq!(turn.failed_attempts, 3);
        assert_eq!(turn.reward, 3.0 * ILLEGAL_MOVE_PENALTY - 1.0);
        assert!(game.is_finished());
        assert_eq!(agent.q_table().nonzero_count(), 0);
    }

    #[test]
    fn test_frozen_copy_is_independent() {
        let mut learner = TdAgent::new(0.5, 0.9, AgentMode::Learning).with_seed(4);
        learner.increment_training_epochs();
        let frozen = learner.frozen_copy(Some(8));

        learner.update_value(1357, action(37), 1.0, Some(1350));

        assert_eq!(frozen.mode(), AgentMode::Frozen);
        assert_eq!(frozen.training_epochs(), 1);
        assert_eq!(frozen.q_table().get(1357, action(37)), 0.0);
        assert_ne!(learner.q_table().get(1357, action(37)), 0.0);
    }

    #[test]
    fn test_refresh_from_copies_table_and_epochs() {
        let mut learner = TdAgent::new(0.5, 0.9, AgentMode::Learning);
        let mut adversary = TdAgent::new(0.5, 0.9, AgentMode::Frozen);
        learner.increment_training_epochs();
        learner.update_value(1357, action(1), 1.0, None);

        adversary.refresh_from(&learner);
        assert_eq!(adversary.q_table(), learner.q_table());
        assert_eq!(adversary.training_epochs(), 1);
        assert_eq!(adversary.mode(), AgentMode::Frozen);

        learner.update_value(1357, action(1), 1.0, None);
        assert_ne!(adversary.q_table(), learner.q_table());
    }
}
