//! # parpu: Command-Line Till
//!
//! Thin host over `parpu-core`. Loads the shop config and data files, runs
//! one command, writes back and exits.

mod cli;
mod commands;
mod config;
mod error;
mod store;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    cli.run()
}

/// Logs go to stderr so command output stays pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,parpu=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
