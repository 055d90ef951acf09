//! Evaluate command - Pit a saved agent against a random mover

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::to_writer_pretty;

use crate::{
    Error,
    adapters::DEFAULT_CACHE_DIR,
    app::App,
    cli::output::{format_number, format_share, print_kv, print_section},
    pipeline::evaluate_against_random,
    q_learning::AgentMode,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate a trained agent against a random player")]
pub struct EvaluateArgs {
    /// Name the agent was trained under
    pub name: String,

    /// Training epochs of the snapshot to load
    pub epochs: usize,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding saved agents
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let app = App::with_cache_dir(&args.cache_dir);
    let agent = match app.load_agent(&args.name, args.epochs, AgentMode::Frozen) {
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

    println!("\n=== Evaluation Configuration ===");
    println!("Agent: {} ({} epochs)", args.name, format_number(args.epochs));
    println!("Opponent: Random");
    println!("Games: {}", format_number(args.games));
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let result = evaluate_against_random(&agent, args.games, args.seed)?;

    print_section("Evaluation Results");
    print_kv("Wins", &format_share(result.wins, result.games));
    print_kv("Losses", &format_share(result.losses, result.games));
    print_kv("Illegal attempts", &format_number(result.failed_attempts));

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        to_writer_pretty(file, &result)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}
