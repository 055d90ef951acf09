//! Play command - A human against a saved agent

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    Error,
    adapters::DEFAULT_CACHE_DIR,
    app::App,
    cli::interactive::Console,
    nim::Game,
    pipeline::DEFAULT_AGENT_NAME,
    ports::Player,
    q_learning::AgentMode,
};

const HUMAN: &str = "You";
const AI: &str = "AI";

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Name the agent was trained under
    #[arg(default_value = DEFAULT_AGENT_NAME)]
    pub name: String,

    /// Training epochs of the snapshot to load
    #[arg(default_value_t = 5000)]
    pub epochs: usize,

    /// Let the agent make the first move
    #[arg(long)]
    pub ai_starts: bool,

    /// Directory holding saved agents
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Random seed for the agent's tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let app = App::with_cache_dir(&args.cache_dir);
    let mut agent = match app.load_agent(&args.name, args.epochs, AgentMode::Frozen) {
        Ok(agent) => agent,
        Err(Error::AgentSnapshotNotFound {
            name,
            training_epochs,
        }) => {
            println!(
                "No agent '{name}' trained for {training_epochs} epochs in {}.",
                args.cache_dir.display()
            );
            println!("Train it first: nim train {name} {training_epochs}");
            return Ok(());
        }
        Err(e) => return Err(e).context("failed to load agent"),
    };
    if let Some(seed) = args.seed {
        agent.reseed(seed);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut agent, args.ai_starts, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Alternate the human and `agent` until the heaps are empty.
///
/// Returns `"You"` or `"AI"` for the winner, or `None` if input ends before
/// the game does.
pub fn run<R: BufRead, W: Write>(
    agent: &mut dyn Player,
    ai_starts: bool,
    input: R,
    output: W,
) -> Result<Option<&'static str>> {
    let mut console = Console::new(input, output);
    let mut game = Game::new();
    let mut ai_to_move = ai_starts;

    while !game.is_finished() {
        console.show_game(&game)?;
        if ai_to_move {
            let turn = agent.take_turn(&mut game)?;
            console.say(&format!(
                "{AI} takes {} sticks in line {}",
                turn.amount, turn.heap_index
            ))?;
        } else if console.human_move(HUMAN, &mut game)?.is_none() {
            return Ok(None);
        }
        ai_to_move = !ai_to_move;
    }

    // Whoever would move next did not take the last stick
    let winner = if ai_to_move { AI } else { HUMAN };
    console.say(&format!("{winner} won!"))?;
    Ok(Some(winner))
}
