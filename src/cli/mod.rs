//! Command-line interface for repo-gemini
//!
//! Provides `ask` and `flatten` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod ask;
mod flatten;
mod utils;

/// Flatten a git repository into one prompt and ask Gemini about it
#[derive(Parser)]
#[command(name = "repo-gemini")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send the flattened repository plus an instruction to Gemini
    Ask(ask::AskArgs),

    /// Print the flattened repository without calling Gemini
    Flatten(flatten::FlattenArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Ask(args) => ask::run(args),
        Commands::Flatten(args) => flatten::run(args),
    }
}
