//! CLI entry point for textile print extraction

use clap::Parser;
use seamprint::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> seamprint::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut processor = FileProcessor::new(cli);
    let processed = processor.process()?;
    tracing::info!(processed, "batch complete");
    Ok(())
}
