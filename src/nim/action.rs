//! Packed move representation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::game::{HEAP_COUNT, INITIAL_HEAPS};
use crate::error::Error;

/// Largest heap index or amount that fits in one decimal digit of the packing.
const DIGIT_MAX: usize = 9;

/// Largest action code any legal move can produce (last heap emptied at once).
pub const MAX_ACTION_CODE: usize = (HEAP_COUNT - 1) * 10 + INITIAL_HEAPS[HEAP_COUNT - 1] as usize;

/// A move packed as `heap_index * 10 + amount`
///
/// The code doubles as the column index of the Q-table. Both digits are
/// limited to 0-9; legality against a concrete position is decided by
/// [`Game::is_valid_move`](super::Game::is_valid_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Action(u8);

impl Action {
    /// Pack a `(heap_index, amount)` pair, or `None` if either exceeds one digit.
    pub fn new(heap_index: usize, amount: usize) -> Option<Self> {
        if heap_index > DIGIT_MAX || amount > DIGIT_MAX {
            return None;
        }
        Some(Self((heap_index * 10 + amount) as u8))
    }

    /// Rebuild an action from its packed code (0-99).
    pub fn from_code(code: usize) -> Option<Self> {
        Self::new(code / 10, code % 10)
    }

    pub fn code(self) -> usize {
        self.0 as usize
    }

    pub fn heap_index(self) -> usize {
        self.code() / 10
    }

    pub fn amount(self) -> usize {
        self.code() % 10
    }
}

impl TryFrom<u8> for Action {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code as usize).ok_or(Error::InvalidAction {
            code: code as usize,
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from heap {}", self.amount(), self.heap_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packing_matches_decimal_layout() {
        let action = Action::new(2, 4).unwrap();
        assert_eq!(action.code(), 24);
        assert_eq!(action.heap_index(), 2);
        assert_eq!(action.amount(), 4);
    }

    #[test]
    fn test_rejects_values_outside_one_digit() {
        assert!(Action::new(10, 1).is_none());
        assert!(Action::new(1, 10).is_none());
        assert!(Action::from_code(100).is_none());
    }

    #[test]
    fn test_deserialize_rejects_multi_digit_heap() {
        assert!(serde_json::from_str::<Action>("255").is_err());
        let action: Action = serde_json::from_str("37").unwrap();
        assert_eq!(action, Action::new(3, 7).unwrap());
    }

    #[test]
    fn test_max_action_code_is_emptying_last_heap() {
        assert_eq!(MAX_ACTION_CODE, 37);
        assert_eq!(Action::new(3, 7).unwrap().code(), MAX_ACTION_CODE);
    }
}
