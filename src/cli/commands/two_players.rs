//! Two-players command - Two humans share one terminal

use std::io::{self, BufRead, Write};

use anyhow::Result;

use crate::{cli::interactive::Console, nim::Game};

const PLAYERS: [&str; 2] = ["A", "B"];

pub fn execute() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Alternate players `A` and `B` until the heaps are empty.
///
/// The player who takes the last stick loses. Returns the winner's label,
/// or `None` if input ends before the game does.
pub fn run<R: BufRead, W: Write>(input: R, output: W) -> Result<Option<&'static str>> {
    let mut console = Console::new(input, output);
    let mut game = Game::new();
    let mut current = 0;

    while !game.is_finished() {
        console.show_game(&game)?;
        if console.human_move(PLAYERS[current], &mut game)?.is_none() {
            return Ok(None);
        }
        current = 1 - current;
    }

    let winner = PLAYERS[current];
    console.say(&format!("Player {winner} won!"))?;
    Ok(Some(winner))
}
