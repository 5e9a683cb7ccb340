use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xtrees::config::job_config;

#[derive(Parser)]
#[command(name = "xtrees-train")]
#[command(about = "Fit an extremely randomized trees classifier on <WORK_DIR>/py_train.tsv")]
#[command(version)]
struct Cli {
    /// Directory holding py_train.tsv; possible_model is written here
    work_dir: PathBuf,

    /// Fix the RNG seed for a reproducible model (drawn from entropy if unset)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of threads used to fit trees (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags win over RUST_LOG; RUST_LOG wins over the info default.
    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => EnvFilter::new("debug"),
        (_, true) => EnvFilter::new("error"),
        _ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = job_config();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(threads) = cli.threads {
        config = config.with_n_jobs(threads);
        info!(threads, "dedicated thread pool requested");
    }

    let summary = xtrees::run_with_config(&cli.work_dir, &config).with_context(|| {
        format!("training job failed in {}", cli.work_dir.display())
    })?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
