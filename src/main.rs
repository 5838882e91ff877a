use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod lifecycle;
mod marathon;
mod templates;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    let _ = dotenvy::dotenv();
    init_logging(args.global.verbose);

    match args.command {
        Command::Create => workflow::run_create(&args.global),
        Command::Destroy => workflow::run_destroy(&args.global),
        Command::Status => workflow::run_status(&args.global),
        Command::Leader => workflow::run_leader(&args.global),
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
