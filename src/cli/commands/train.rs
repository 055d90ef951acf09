//! Train command - Self-play training of a Q-learning agent

use std::{path::PathBuf, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::DEFAULT_CACHE_DIR,
    app::{AgentConfig, App},
    cli::output::{format_number, format_share, print_kv, print_section},
    export::HistoryCsvExporter,
    pipeline::{MetricsObserver, Observer, ProgressObserver, TrainingConfig},
    q_learning::{DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent by self-play")]
pub struct TrainArgs {
    /// Name to save the agent under
    pub name: String,

    /// Number of self-play games
    pub epochs: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for saved agents
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    /// Learning rate α
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_FACTOR)]
    pub discount: f64,

    /// Optional CSV file for per-epoch reward and fail history
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Optional JSON file for the full training result
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut agent_config = AgentConfig::new()
        .with_learning_rate(args.learning_rate)
        .with_discount_factor(args.discount);
    if let Some(seed) = args.seed {
        agent_config = agent_config.with_seed(seed);
    }
    agent_config.validate()?;

    let training_config = TrainingConfig {
        name: args.name.clone(),
        epochs: args.epochs,
        seed: args.seed,
    };

    println!("\n=== Self-Play Training ===");
    println!("Agent: {}", args.name);
    println!("Epochs: {}", format_number(args.epochs));
    println!(
        "Learning rate: {}, discount factor: {}",
        args.learning_rate, args.discount
    );
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let metrics = MetricsObserver::new();
    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(metrics.clone())];
    if args.progress {
        observers.push(Box::new(ProgressObserver::new()));
    }

    let app = App::with_cache_dir(&args.cache_dir);
    let start = Instant::now();
    let (agent, result) = app
        .train(agent_config, training_config, observers)
        .context("self-play training failed")?;
    let elapsed = start.elapsed();

    let summary = metrics.summary();
    print_section("Training Complete");
    print_kv(
        "Time",
        &format!("{:.2}s for {} epochs", elapsed.as_secs_f64(), result.epochs),
    );
    print_kv(
        "Learner wins",
        &format_share(result.learner_wins, result.epochs),
    );
    print_kv(
        "Learner losses",
        &format_share(result.learner_losses, result.epochs),
    );
    print_kv("Average reward", &format!("{:.3}", summary.avg_reward));
    print_kv(
        "Average game length",
        &format!("{:.1} turns", summary.avg_game_length),
    );
    print_kv("Illegal attempts", &format_number(result.total_failed_attempts));
    print_kv(
        "Non-zero Q-values",
        &format_number(agent.q_table().nonzero_count()),
    );
    print_kv(
        "Snapshots",
        &result
            .snapshots
            .iter()
            .map(|epochs| epochs.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    );
    print_kv("Saved under", &args.cache_dir.display().to_string());

    if let Some(path) = &args.history {
        HistoryCsvExporter::default()
            .export(path, &result.history)
            .with_context(|| format!("failed to write history to {}", path.display()))?;
        println!("\n✓ History written to: {}", path.display());
    }

    if let Some(path) = &args.summary {
        result
            .save(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}
