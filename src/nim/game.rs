//! Heap state machine

use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::{Error, Result};

/// Number of heaps on the table
pub const HEAP_COUNT: usize = 4;

/// Starting heap sizes
pub const INITIAL_HEAPS: [u8; HEAP_COUNT] = [1, 3, 5, 7];

/// Largest state code; the initial position has the most sticks in every heap.
pub const MAX_STATE_CODE: usize = encode(&INITIAL_HEAPS);

// Digit concatenation is only injective while every heap fits in one digit.
const _: () = {
    let mut i = 0;
    while i < HEAP_COUNT {
        assert!(INITIAL_HEAPS[i] <= 9);
        i += 1;
    }
};

const fn encode(heaps: &[u8; HEAP_COUNT]) -> usize {
    let mut code = 0;
    let mut i = 0;
    while i < HEAP_COUNT {
        code = code * 10 + heaps[i] as usize;
        i += 1;
    }
    code
}

/// Coarse game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished,
}

/// A single match: the remaining sticks in each heap
///
/// Heaps only ever shrink through [`Game::apply_move`], so every heap stays
/// between zero and its initial size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GameRecord")]
pub struct Game {
    heaps: [u8; HEAP_COUNT],
}

/// Unchecked wire form of a [`Game`], validated through [`Game::from_heaps`]
#[derive(Deserialize)]
struct GameRecord {
    heaps: [u8; HEAP_COUNT],
}

impl TryFrom<GameRecord> for Game {
    type Error = Error;

    fn try_from(record: GameRecord) -> Result<Self> {
        Game::from_heaps(record.heaps)
    }
}

impl Game {
    /// Create a game at the initial position
    pub fn new() -> Self {
        Self {
            heaps: INITIAL_HEAPS,
        }
    }

    /// Create a game at an arbitrary position
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHeaps`] if any heap exceeds its initial size.
    pub fn from_heaps(heaps: [u8; HEAP_COUNT]) -> Result<Self> {
        if heaps.iter().zip(INITIAL_HEAPS.iter()).any(|(h, max)| h > max) {
            return Err(Error::InvalidHeaps {
                heaps: heaps.to_vec(),
                initial: INITIAL_HEAPS.to_vec(),
            });
        }
        Ok(Self { heaps })
    }

    /// Put every heap back to its initial size
    pub fn reset(&mut self) {
        self.heaps = INITIAL_HEAPS;
    }

    pub fn heaps(&self) -> [u8; HEAP_COUNT] {
        self.heaps
    }

    /// Total number of sticks left on the table
    pub fn remaining(&self) -> usize {
        self.heaps.iter().map(|&h| h as usize).sum()
    }

    pub fn is_valid_move(&self, heap_index: usize, amount: usize) -> bool {
        heap_index < HEAP_COUNT && amount >= 1 && self.heaps[heap_index] as usize >= amount
    }

    /// Remove `amount` sticks from heap `heap_index`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] and leaves the heaps untouched when the
    /// heap does not exist, the amount is zero, or the heap is too small.
    pub fn apply_move(&mut self, heap_index: usize, amount: usize) -> Result<()> {
        if !self.is_valid_move(heap_index, amount) {
            return Err(Error::InvalidMove { heap_index, amount });
        }
        self.heaps[heap_index] -= amount as u8;
        Ok(())
    }

    pub fn apply_action(&mut self, action: Action) -> Result<()> {
        self.apply_move(action.heap_index(), action.amount())
    }

    /// Heaps concatenated as decimal digits, e.g. `[1, 3, 5, 0]` -> `1350`
    pub fn encoded_state(&self) -> usize {
        encode(&self.heaps)
    }

    /// Every action that is valid from the current position, by heap then amount
    pub fn legal_actions(&self) -> Vec<Action> {
        self.heaps
            .iter()
            .enumerate()
            .flat_map(|(heap_index, &size)| {
                (1..=size as usize).filter_map(move |amount| Action::new(heap_index, amount))
            })
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.heaps.iter().all(|&h| h == 0)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_finished() {
            GameStatus::Finished
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per heap, sticks drawn as tally marks
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (heap_index, &size) in self.heaps.iter().enumerate() {
            writeln!(f, "{heap_index}: {}", "|".repeat(size as usize))?;
        }
        Ok(())
    }
}
