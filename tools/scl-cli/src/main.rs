//! sclgen - TIA Portal code generator for elevator device graphs
//!
//! Turns a `graph.json` exported by the graph editor into the SCL data blocks
//! and tag-table constants of a TIA Portal project.

use clap::{Parser, Subcommand};
use commands::{generate::GenerateCommand, types::TypesCommand};
use tracing_subscriber::EnvFilter;

mod bundle;
mod commands;
mod error;
mod output;

/// sclgen - Generate TIA Portal data blocks from a device graph
#[derive(Debug, Parser)]
#[command(name = "sclgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate SCL blocks and constants from graph.json
    #[command(name = "generate")]
    Generate(GenerateCommand),

    /// List the supported mechanism types
    #[command(name = "types")]
    Types(TypesCommand),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Generate(cmd) => cmd.execute(),
        Command::Types(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for `--json` and `--dry-run`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
