//! Line-oriented console for human players
//!
//! Generic over the reader and writer so the game loops can be driven from
//! scripted input in tests.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::nim::Game;

/// Outcome of parsing one prompted move
enum MoveInput {
    Move { heap_index: usize, amount: usize },
    /// Integers that can never name a move, such as negative numbers
    Impossible,
    NotIntegers,
}

fn parse_move(sticks: &str, line: &str) -> MoveInput {
    let (Ok(amount), Ok(heap_index)) = (sticks.trim().parse::<i64>(), line.trim().parse::<i64>())
    else {
        return MoveInput::NotIntegers;
    };
    match (usize::try_from(heap_index), usize::try_from(amount)) {
        (Ok(heap_index), Ok(amount)) => MoveInput::Move { heap_index, amount },
        _ => MoveInput::Impossible,
    }
}

/// Prompts and board rendering over an arbitrary input/output pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of text
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn show_game(&mut self, game: &Game) -> Result<()> {
        writeln!(self.output, "Current state is:")?;
        write!(self.output, "{game}")?;
        Ok(())
    }

    /// Ask `question` and read one answer; `None` once input is exhausted
    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question} -> ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer))
    }

    /// Prompt `player` until they make a legal move on `game`.
    ///
    /// Returns the move played, or `None` if input ran out first.
    pub fn human_move(
        &mut self,
        player: &str,
        game: &mut Game,
    ) -> Result<Option<(usize, usize)>> {
        writeln!(self.output, "\nPlayer {player} it is your turn")?;
        loop {
            let Some(sticks) = self.ask("How many sticks do you want to get rid of?")? else {
                return Ok(None);
            };
            let Some(line) = self.ask("On what line?")? else {
                return Ok(None);
            };

            match parse_move(&sticks, &line) {
                MoveInput::Move { heap_index, amount } => {
                    if game.apply_move(heap_index, amount).is_ok() {
                        return Ok(Some((heap_index, amount)));
                    }
                    self.say("You cannot make this play")?;
                }
                MoveInput::Impossible => self.say("You cannot make this play")?,
                MoveInput::NotIntegers => self.say("Please enter integer(s)")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
