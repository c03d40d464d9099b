//! Platemap CLI - Command-line interface
//!
//! The presentation collaborator for the platemap core: loads the CSV
//! dataset, owns request defaults, and renders analysis output as tables or
//! JSON.

mod cli;
mod commands;
mod dataset;
mod defaults;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
