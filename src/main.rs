//! tap-zohobooks
//!
//! Singer tap entry point. Messages go to stdout, logs to stderr.

use anyhow::Context;
use clap::Parser;
use tap_zohobooks::cli::{Cli, Runner};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let runner = Runner::new(cli);
    runner.run().await.context("tap-zohobooks failed")?;
    Ok(())
}
