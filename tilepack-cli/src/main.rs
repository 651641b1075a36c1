//! TilePack CLI - command-line interface
//!
//! This binary provides catalog inspection and manifest tooling on top
//! of the tilepack library.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use commands::manifest::ManifestAction;
use commands::regions::RegionsAction;

#[derive(Parser)]
#[command(
    name = "tilepack",
    version,
    about = "Offline map tile catalog management"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the binary tile manifest
    Manifest {
        #[command(subcommand)]
        action: ManifestAction,
    },
    /// Inspect the region tree
    Regions {
        #[command(subcommand)]
        action: RegionsAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Manifest { action } => commands::manifest::run(action),
        Commands::Regions { action } => commands::regions::run(action),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
