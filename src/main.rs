use clap::Parser;
use std::path::PathBuf;

use cinedex::{Config, run};

/// Movie catalog HTTP service: CSV ingest plus paginated queries.
#[derive(Parser)]
#[command(name = "cinedex", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: the standard search paths)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(config))
}
