//! recall-sweep - command-line driver for recall simulations.
//!
//! # Configuration
//!
//! `run` and `summary` read a TOML/JSON/YAML file given with `--config`
//! (or `RECALL_CONFIG`). Without one, defaults are used with these
//! environment overrides (a `.env` file is honoured):
//!
//! - `RECALL_NEURONS`, `RECALL_RUNS`, `RECALL_SEED`, `RECALL_GENERATOR`
//! - `RECALL_RESULTS_PATH` - defaults to `~/.recall/sweep.jsonl`
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use recall_core::{expected_scaling, memory_recall_outcome, GeneratorKind, RecallParams};
use recall_sweep::{summarize, ResultStore, SweepConfig, SweepRunner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "recall-sweep", version, about = "Associative recall simulations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run (or resume) the configured sweep
    Run {
        #[arg(long, env = "RECALL_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Run a single recall process and print the distinct count
    Single {
        #[arg(long, default_value_t = 5)]
        items: usize,
        #[arg(long, default_value_t = 3000)]
        neurons: usize,
        #[arg(long, default_value_t = 0.1)]
        activation: f64,
        #[arg(long, default_value_t = 5)]
        seed: u64,
        #[arg(long, default_value_t = GeneratorKind::Bernoulli)]
        generator: GeneratorKind,
        /// Also print the visiting order
        #[arg(long)]
        show_trace: bool,
    },
    /// Compare stored results against the scaling law
    Summary {
        #[arg(long, env = "RECALL_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the predicted distinct count for L items
    Expected {
        #[arg(long)]
        items: usize,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<SweepConfig> {
    let config = match path {
        Some(path) => SweepConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SweepConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    match Cli::parse().command {
        Command::Run { config } => {
            let config = load_config(config)?;
            let store = ResultStore::open(&config.results_path)?;
            let stats = SweepRunner::new(config, store).run()?;
            println!(
                "executed {} cells, skipped {}, {} checkpoints",
                stats.executed, stats.skipped, stats.checkpoints
            );
        }
        Command::Single {
            items,
            neurons,
            activation,
            seed,
            generator,
            show_trace,
        } => {
            let params = RecallParams::new(items, neurons, activation).with_generator(generator);
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = memory_recall_outcome(&params, &mut rng)?;
            println!("{}", outcome.distinct);
            if show_trace {
                println!("trace: {:?}", outcome.trace);
                println!("stop: {:?} after {} steps", outcome.stop, outcome.steps);
            }
        }
        Command::Summary { config } => {
            let config = load_config(config)?;
            let store = ResultStore::open(&config.results_path)?;
            let rows = summarize(&store.grouped_for(&config)?);
            if rows.is_empty() {
                println!("no results in {}", store.path().display());
                return Ok(());
            }
            println!("{:>8} {:>6} {:>8} {:>9} {:>9} {:>8}", "f", "L", "runs", "mean", "expected", "error");
            for row in rows {
                println!(
                    "{:>8} {:>6} {:>8} {:>9.2} {:>9.2} {:>7.1}%",
                    row.key.activation(),
                    row.key.items,
                    row.samples,
                    row.mean,
                    row.expected,
                    row.relative_error * 100.0
                );
            }
        }
        Command::Expected { items } => {
            println!("{:.4}", expected_scaling(items));
        }
    }

    Ok(())
}
