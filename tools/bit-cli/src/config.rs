//! Config command - show or initialize bit.toml

use anyhow::{Context, Result};
use bit_core::BitConfig;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default config to the platform config path
    #[arg(long)]
    pub init: bool,

    /// Config file to show (defaults to the platform config)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    if args.init {
        let path = match &args.config {
            Some(path) => {
                bit_core::config::save_to(&BitConfig::default(), path)?;
                path.clone()
            }
            None => bit_core::config::save(&BitConfig::default())?,
        };
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = crate::load_config(args.config.as_deref())?;
    let text = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{text}");
    Ok(())
}
