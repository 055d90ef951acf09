//! Exhaustive checks over every position reachable from `[1, 3, 5, 7]`.

use std::collections::{HashSet, VecDeque};

use nim_qlearn::nim::{Game, HEAP_COUNT, MAX_ACTION_CODE, MAX_STATE_CODE};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

fn reachable_games() -> Vec<Game> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([Game::new()]);
    let mut games = Vec::new();

    while let Some(game) = queue.pop_front() {
        if !seen.insert(game.encoded_state()) {
            continue;
        }
        games.push(game);
        for action in game.legal_actions() {
            let mut next = game;
            next.apply_action(action).unwrap();
            queue.push_back(next);
        }
    }
    games
}

#[test]
fn reachable_state_count_matches_heap_product() {
    // (1+1) * (3+1) * (5+1) * (7+1)
    assert_eq!(reachable_games().len(), 384);
}

#[test]
fn legal_actions_stay_within_heaps() {
    for game in reachable_games() {
        let heaps = game.heaps();
        for action in game.legal_actions() {
            assert!(action.heap_index() < HEAP_COUNT);
            assert!(action.amount() >= 1);
            assert!(action.amount() <= heaps[action.heap_index()] as usize);
            assert!(action.code() <= MAX_ACTION_CODE);
        }
        assert!(game.encoded_state() <= MAX_STATE_CODE);
        assert_eq!(game.legal_actions().is_empty(), game.is_finished());
    }
}

#[test]
fn illegal_moves_leave_every_state_unchanged() {
    for game in reachable_games() {
        let heaps = game.heaps();
        for heap_index in 0..=HEAP_COUNT {
            let limit = heaps.get(heap_index).copied().unwrap_or(0) as usize;
            for amount in [0, limit + 1] {
                let mut copy = game;
                assert!(copy.apply_move(heap_index, amount).is_err());
                assert_eq!(copy, game);
            }
        }
    }
}

#[test]
fn taking_the_whole_last_heap_is_not_terminal() {
    let mut game = Game::new();
    game.apply_move(3, 7).unwrap();
    assert_eq!(game.heaps(), [1, 3, 5, 0]);
    assert!(!game.is_finished());
}

#[test]
fn single_stick_removal_finishes_exactly_at_zero() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..50 {
        let mut game = Game::new();
        let mut moves = 0;
        while !game.is_finished() {
            let non_empty: Vec<usize> = (0..HEAP_COUNT)
                .filter(|&heap| game.heaps()[heap] > 0)
                .collect();
            let heap = *non_empty.choose(&mut rng).unwrap();
            game.apply_move(heap, 1).unwrap();
            moves += 1;
            assert_eq!(game.is_finished(), game.remaining() == 0);
        }
        assert_eq!(moves, 16);
        assert_eq!(game.heaps(), [0, 0, 0, 0]);
    }
}
