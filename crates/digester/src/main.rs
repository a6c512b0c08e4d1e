//! Digester CLI - Slack export rich text renderer.
//!
//! Provides commands for:
//! - `render`: Render a channel export file to markdown and HTML
//! - `check`: Verify that every message in an export file decodes

mod commands;
mod error;
mod export;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Reporter;

/// Digester - Slack export rich text renderer.
#[derive(Parser)]
#[command(name = "digester", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render messages to markdown and HTML.
    Render(RenderArgs),
    /// Decode messages without rendering and report failures.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let reporter = Reporter::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Check(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        reporter.fatal(&err);
        std::process::exit(1);
    }
}
