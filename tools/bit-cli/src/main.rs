//! Bit CLI - headless driver for the Bit widget core
//!
//! # Commands
//!
//! - `bit export` - Write the idle/yes/no meshes as Wavefront OBJ
//! - `bit simulate` - Run a scripted frame loop and print the final scene
//! - `bit ask` - Ask the Bit a question and print its answer
//! - `bit config` - Print the effective config or write the defaults
//!
//! # Usage
//!
//! ```bash
//! # Meshes for inspection in any 3D viewer
//! bit export --out meshes/
//!
//! # Press yes at 0.5s, release at 1.5s, run for 3s
//! bit simulate --event 0.5:yes --event 1.5:release --seconds 3
//!
//! bit ask "Should I deploy on a Friday?"
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

mod ask;
mod config;
mod export;
mod simulate;

use std::path::Path;

use anyhow::{Context, Result};
use bit_core::BitConfig;
use clap::{Parser, Subcommand};

/// Bit CLI - headless driver for the Bit widget core
#[derive(Parser)]
#[command(name = "bit")]
#[command(about = "Headless driver for the Bit yes/no widget")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the three meshes as Wavefront OBJ files
    Export(export::ExportArgs),

    /// Run a headless frame loop with scripted input
    Simulate(simulate::SimulateArgs),

    /// Ask a question and wait for the answer
    Ask(ask::AskArgs),

    /// Print the effective config, or write the defaults
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Ask(args) => ask::execute(args),
        Commands::Config(args) => config::execute(args),
    }
}

/// Config from an explicit file, or the platform config with defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<BitConfig> {
    match path {
        Some(path) => bit_core::config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(bit_core::config::load()),
    }
}
