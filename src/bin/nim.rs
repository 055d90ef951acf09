//! Nim CLI - Train, play against and evaluate self-taught Q-learning agents
//!
//! This CLI provides:
//! - Self-play training with periodic snapshots
//! - Interactive games against a saved agent or another human
//! - Evaluation of saved agents against a random player

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nim")]
#[command(version, about = "Q-learning agents for the game of Nim", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent by self-play
    Train(nim_qlearn::cli::commands::train::TrainArgs),

    /// Play against a trained agent
    Play(nim_qlearn::cli::commands::play::PlayArgs),

    /// Two humans play on the same terminal
    TwoPlayers,

    /// Evaluate a trained agent against a random player
    Evaluate(nim_qlearn::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => nim_qlearn::cli::commands::train::execute(args),
        Commands::Play(args) => nim_qlearn::cli::commands::play::execute(args),
        Commands::TwoPlayers => nim_qlearn::cli::commands::two_players::execute(),
        Commands::Evaluate(args) => nim_qlearn::cli::commands::evaluate::execute(args),
    }
}
